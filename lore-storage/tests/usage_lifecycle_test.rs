use chrono::Utc;
use lore_core::lesson::NewUsage;
use lore_core::traits::ILessonStorage;
use lore_core::LoreError;
use lore_storage::StorageEngine;
use test_fixtures::{generic_lesson, with_category_and_tags};

fn view(lesson_id: &str) -> NewUsage {
    NewUsage {
        lesson_id: lesson_id.to_string(),
        query_context: Some("keyword search".to_string()),
        was_helpful: None,
        session_id: Some("s-1".to_string()),
    }
}

#[test]
fn usage_stats_count_views_and_helpful_votes() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Measure before optimizing.", "api");
    engine.create(&lesson).unwrap();

    engine.record_usage(&view(&lesson.id)).unwrap();
    engine.record_usage(&view(&lesson.id)).unwrap();
    engine
        .record_usage(&NewUsage {
            was_helpful: Some(true),
            ..view(&lesson.id)
        })
        .unwrap();

    let stats = engine.usage_stats(&lesson.id).unwrap();
    assert_eq!(stats.usage_count, 3);
    assert_eq!(stats.helpful_count, 1);
}

#[test]
fn latest_usage_feedback_overwrite() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Prefer explicit timeouts.", "api");
    engine.create(&lesson).unwrap();

    engine.record_usage(&view(&lesson.id)).unwrap();
    let latest = engine.latest_usage(&lesson.id).unwrap().unwrap();
    assert_eq!(latest.was_helpful, None);

    engine.set_usage_feedback(latest.id, true).unwrap();
    let latest = engine.latest_usage(&lesson.id).unwrap().unwrap();
    assert_eq!(latest.was_helpful, Some(true));

    let stats = engine.usage_stats(&lesson.id).unwrap();
    assert_eq!(stats.usage_count, 1);
    assert_eq!(stats.helpful_count, 1);
}

#[test]
fn deprecate_restore_round_trip() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Old advice.", "api");
    engine.create(&lesson).unwrap();

    engine.deprecate(&lesson.id, Utc::now()).unwrap();
    assert!(engine.get(&lesson.id).unwrap().unwrap().deprecated_at.is_some());

    engine.restore(&lesson.id).unwrap();
    assert!(engine.get(&lesson.id).unwrap().unwrap().deprecated_at.is_none());
}

#[test]
fn supersede_points_and_deprecates() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let old = generic_lesson("Use the v1 client.", "api");
    let new = generic_lesson("Use the v2 client.", "api");
    engine.create(&old).unwrap();
    engine.create(&new).unwrap();

    engine.supersede(&old.id, &new.id).unwrap();
    let loaded = engine.get(&old.id).unwrap().unwrap();
    assert_eq!(loaded.superseded_by.as_deref(), Some(new.id.as_str()));
    assert!(loaded.deprecated_at.is_some());
}

#[test]
fn supersede_unknown_replacement_is_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let old = generic_lesson("Use the v1 client.", "api");
    engine.create(&old).unwrap();

    let err = engine.supersede(&old.id, "missing").unwrap_err();
    assert!(matches!(err, LoreError::LessonNotFound { .. }));
}

#[test]
fn category_statistics_aggregate_per_category() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = with_category_and_tags(generic_lesson("A body.", "api"), "testing", &[]);
    let b = with_category_and_tags(generic_lesson("B body.", "api"), "testing", &[]);
    let c = with_category_and_tags(generic_lesson("C body.", "api"), "security", &[]);
    engine.create(&a).unwrap();
    engine.create(&b).unwrap();
    engine.create(&c).unwrap();
    engine.deprecate(&b.id, Utc::now()).unwrap();

    let stats = engine.category_statistics().unwrap();
    assert_eq!(stats.len(), 2);
    let testing = stats.iter().find(|s| s.category == "testing").unwrap();
    assert_eq!(testing.total, 2);
    assert_eq!(testing.active, 1);
    assert_eq!(testing.deprecated, 1);
}
