use lore_core::config::{ScoringConfig, TrackerConfig};
use lore_core::lesson::NewUsage;
use lore_core::traits::ILessonStorage;
use lore_core::LoreError;
use lore_scoring::{RelevanceScorer, RetrievalTracker};
use lore_storage::StorageEngine;
use test_fixtures::{created_days_ago, generic_lesson};

fn helpful_usage(lesson_id: &str) -> NewUsage {
    NewUsage {
        lesson_id: lesson_id.to_string(),
        query_context: None,
        was_helpful: Some(true),
        session_id: None,
    }
}

fn view_usage(lesson_id: &str) -> NewUsage {
    NewUsage {
        was_helpful: None,
        ..helpful_usage(lesson_id)
    }
}

#[test]
fn live_run_overwrites_scores_from_usage_data() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let popular = created_days_ago(generic_lesson("Popular recent lesson.", "api"), 10);
    let stale = created_days_ago(generic_lesson("Stale unloved lesson.", "api"), 400);
    engine.create(&popular).unwrap();
    engine.create(&stale).unwrap();
    for _ in 0..10 {
        engine.record_usage(&helpful_usage(&popular.id)).unwrap();
    }

    let scorer = RelevanceScorer::new(ScoringConfig::default());
    let report = scorer.recompute_all(&engine, 1, false).unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.updated, 2);

    let popular_score = engine.get(&popular.id).unwrap().unwrap().relevance_score;
    let stale_score = engine.get(&stale.id).unwrap().unwrap().relevance_score;
    assert!(popular_score > stale_score);
    assert!((0.0..=1.0).contains(&popular_score));
    // 0.4*ln(11)/ln(1001) + 0.4*1.0 + 0.2*(1 - 10/365) ≈ 0.733
    assert!((popular_score - 0.733).abs() < 0.005);
}

#[test]
fn dry_run_reports_drift_without_writing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Fresh lesson.", "api");
    engine.create(&lesson).unwrap();

    let scorer = RelevanceScorer::new(ScoringConfig::default());
    let report = scorer.recompute_all(&engine, 50, true).unwrap();
    // Stored 0.0 vs computed 0.2 recency drift.
    assert_eq!(report.processed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(engine.get(&lesson.id).unwrap().unwrap().relevance_score, 0.0);

    // After a live run the dry run goes quiet.
    scorer.recompute_all(&engine, 50, false).unwrap();
    let report = scorer.recompute_all(&engine, 50, true).unwrap();
    assert_eq!(report.updated, 0);
}

#[test]
fn rerunning_live_is_idempotent() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Some lesson.", "api");
    engine.create(&lesson).unwrap();
    engine.record_usage(&helpful_usage(&lesson.id)).unwrap();

    let scorer = RelevanceScorer::new(ScoringConfig::default());
    scorer.recompute_all(&engine, 10, false).unwrap();
    let first = engine.get(&lesson.id).unwrap().unwrap().relevance_score;
    scorer.recompute_all(&engine, 10, false).unwrap();
    let second = engine.get(&lesson.id).unwrap().unwrap().relevance_score;
    assert!((first - second).abs() < 1e-9);
}

#[test]
fn feedback_overwrites_the_latest_usage_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Lesson with feedback.", "api");
    engine.create(&lesson).unwrap();
    engine.record_usage(&view_usage(&lesson.id)).unwrap();

    let tracker = RetrievalTracker::new(TrackerConfig::default());
    tracker
        .record_feedback(&engine, &lesson.id, true, None)
        .unwrap();
    tracker
        .record_feedback(&engine, &lesson.id, false, None)
        .unwrap();

    // Repeated feedback converged on the single existing row.
    let stats = engine.usage_stats(&lesson.id).unwrap();
    assert_eq!(stats.usage_count, 1);
    assert_eq!(stats.helpful_count, 0);
}

#[test]
fn feedback_without_prior_usage_inserts_one_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Never surfaced lesson.", "api");
    engine.create(&lesson).unwrap();

    let tracker = RetrievalTracker::new(TrackerConfig::default());
    tracker
        .record_feedback(&engine, &lesson.id, true, Some("s-9"))
        .unwrap();

    let latest = engine.latest_usage(&lesson.id).unwrap().unwrap();
    assert_eq!(latest.query_context.as_deref(), Some("Explicit feedback"));
    assert_eq!(latest.was_helpful, Some(true));
}

#[test]
fn feedback_for_unknown_lesson_is_not_found() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let tracker = RetrievalTracker::new(TrackerConfig::default());
    let err = tracker
        .record_feedback(&engine, "missing", true, None)
        .unwrap_err();
    assert!(matches!(err, LoreError::LessonNotFound { .. }));
}

#[test]
fn append_history_mode_keeps_every_feedback_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let lesson = generic_lesson("Lesson with history.", "api");
    engine.create(&lesson).unwrap();

    let tracker = RetrievalTracker::new(TrackerConfig {
        append_history: true,
        ..TrackerConfig::default()
    });
    tracker
        .record_feedback(&engine, &lesson.id, true, None)
        .unwrap();
    tracker
        .record_feedback(&engine, &lesson.id, false, None)
        .unwrap();

    let stats = engine.usage_stats(&lesson.id).unwrap();
    assert_eq!(stats.usage_count, 2);
    assert_eq!(stats.helpful_count, 1);
}
