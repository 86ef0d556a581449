use chrono::Utc;
use lore_core::lesson::Namespace;
use lore_core::traits::ILessonStorage;
use lore_core::{LoreConfig, LoreError};
use lore_retrieval::{OrderedBy, SearchEngine, SearchRequest};
use lore_storage::StorageEngine;
use test_fixtures::{generic_lesson, project_lesson, with_category_and_tags};

#[test]
fn keyword_search_ranks_hybrid_and_records_usage() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let mut high = generic_lesson("Retry transient network failures with backoff.", "api");
    high.relevance_score = 0.9;
    let low = generic_lesson("Retry budgets cap cascading network failures.", "api");
    storage.create(&high).unwrap();
    storage.create(&low).unwrap();

    let response = engine
        .search(&SearchRequest::keyword(Namespace::Generic, "network failures"))
        .unwrap();

    assert_eq!(response.ordered_by, OrderedBy::Hybrid);
    assert_eq!(response.hits.len(), 2);
    // Equal text relevance, so the stored score decides.
    assert_eq!(response.hits[0].lesson.id, high.id);

    // Both surfaced lessons got an implicit usage row.
    assert_eq!(storage.usage_stats(&high.id).unwrap().usage_count, 1);
    assert_eq!(storage.usage_stats(&low.id).unwrap().usage_count, 1);
}

#[test]
fn unmatched_query_falls_back_to_substring() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let lesson = generic_lesson("Configure the xyzzy-widget before boot.", "api");
    storage.create(&lesson).unwrap();

    let response = engine
        .search(&SearchRequest::keyword(Namespace::Generic, "zzy-wid"))
        .unwrap();
    assert_eq!(response.ordered_by, OrderedBy::RecencyFallback);
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].lesson.id, lesson.id);
}

#[test]
fn browse_orders_by_stored_relevance() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let mut a = generic_lesson("First lesson body.", "api");
    a.relevance_score = 0.2;
    let mut b = generic_lesson("Second lesson body.", "api");
    b.relevance_score = 0.8;
    storage.create(&a).unwrap();
    storage.create(&b).unwrap();

    let response = engine
        .search(&SearchRequest::browse(Namespace::Generic))
        .unwrap();
    assert_eq!(response.ordered_by, OrderedBy::StoredRelevance);
    assert_eq!(response.hits[0].lesson.id, b.id);
    // Browsing records no implicit usage.
    assert_eq!(storage.usage_stats(&b.id).unwrap().usage_count, 0);
}

#[test]
fn namespaces_never_mix() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    storage
        .create(&generic_lesson("Shared retry lore.", "api"))
        .unwrap();
    storage
        .create(&project_lesson("Billing retry quirks.", "billing"))
        .unwrap();

    let generic = engine
        .search(&SearchRequest::keyword(Namespace::Generic, "retry"))
        .unwrap();
    assert_eq!(generic.hits.len(), 1);
    assert!(generic.hits[0].lesson.is_generic);

    let billing = engine
        .search(&SearchRequest::keyword(
            Namespace::ProjectDetail("billing".to_string()),
            "retry",
        ))
        .unwrap();
    assert_eq!(billing.hits.len(), 1);
    assert_eq!(billing.hits[0].lesson.source_project, "billing");
}

#[test]
fn deprecated_lessons_only_appear_when_asked() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let lesson = generic_lesson("Obsolete guidance on submodules.", "api");
    storage.create(&lesson).unwrap();
    storage.deprecate(&lesson.id, Utc::now()).unwrap();

    let active = engine
        .search(&SearchRequest::keyword(Namespace::Generic, "submodules"))
        .unwrap();
    assert!(active.hits.is_empty());

    let mut all = SearchRequest::keyword(Namespace::Generic, "submodules");
    all.active_only = false;
    let all = engine.search(&all).unwrap();
    assert_eq!(all.hits.len(), 1);
}

#[test]
fn category_argument_resolves_to_subcategory_when_one_exists() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let mut classified = with_category_and_tags(
        generic_lesson("Unit test the merge logic.", "api"),
        "testing",
        &[],
    );
    classified.subcategory = Some("unit-testing".to_string());
    let plain = with_category_and_tags(
        generic_lesson("Integration-test the whole flow.", "api"),
        "testing",
        &[],
    );
    storage.create(&classified).unwrap();
    storage.create(&plain).unwrap();

    // "unit-testing" exists as a subcategory: filters on subcategory.
    let response = engine
        .by_category("unit-testing", &Namespace::Generic, None)
        .unwrap();
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].lesson.id, classified.id);

    // "testing" is the umbrella category: both match.
    let response = engine.by_category("testing", &Namespace::Generic, None).unwrap();
    assert_eq!(response.hits.len(), 2);

    // A hyphenated string nothing carries falls back to a category filter
    // and yields nothing, not an error.
    let response = engine
        .by_category("no-such-thing", &Namespace::Generic, None)
        .unwrap();
    assert!(response.hits.is_empty());
}

#[test]
fn empty_category_is_a_typed_error() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let err = engine
        .by_category("  ", &Namespace::Generic, None)
        .unwrap_err();
    assert!(matches!(err, LoreError::CategoryRequired));
}

#[test]
fn tag_filter_matches_any_of_the_supplied_tags() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let tagged = with_category_and_tags(
        generic_lesson("Lesson about queues.", "api"),
        "backend",
        &["queues", "redis"],
    );
    let other = with_category_and_tags(
        generic_lesson("Lesson about CSS.", "api"),
        "frontend",
        &["css"],
    );
    storage.create(&tagged).unwrap();
    storage.create(&other).unwrap();

    let response = engine
        .by_tags(
            &["redis".to_string(), "missing".to_string()],
            &Namespace::Generic,
            None,
        )
        .unwrap();
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].lesson.id, tagged.id);
}

#[test]
fn include_related_attaches_typed_edges() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let a = with_category_and_tags(
        generic_lesson("Pest suites need a fixed seed.", "api"),
        "testing",
        &["php", "pest"],
    );
    let b = with_category_and_tags(
        generic_lesson("Pest snapshots belong in version control.", "api"),
        "testing",
        &["php", "pest", "laravel"],
    );
    storage.create(&a).unwrap();
    storage.create(&b).unwrap();
    storage
        .add_relationship(&lore_core::lesson::LessonRelationship {
            lesson_id: a.id.clone(),
            related_lesson_id: b.id.clone(),
            relationship_type: lore_core::lesson::RelationshipType::Related,
            relevance_score: 2.0 / 3.0,
            created_at: Utc::now(),
        })
        .unwrap();

    let mut request = SearchRequest::keyword(Namespace::Generic, "fixed seed");
    request.include_related = true;
    let response = engine.search(&request).unwrap();
    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.hits[0].related.len(), 1);
    assert_eq!(response.hits[0].related[0].lesson.id, b.id);
    assert!((response.hits[0].related[0].relevance_score - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn related_to_unknown_lesson_is_not_found() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let err = engine.related_to("missing").unwrap_err();
    assert!(matches!(err, LoreError::LessonNotFound { .. }));
}

#[test]
fn top_by_score_returns_the_best_active_lessons() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let mut best = generic_lesson("The best lesson.", "api");
    best.relevance_score = 0.95;
    let mut worst = generic_lesson("The worst lesson.", "api");
    worst.relevance_score = 0.05;
    storage.create(&best).unwrap();
    storage.create(&worst).unwrap();

    let top = engine.top_by_score(&Namespace::Generic, Some(1)).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, best.id);
}

#[test]
fn mark_helpful_round_trips_through_the_tracker() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let config = LoreConfig::default();
    let engine = SearchEngine::new(&storage, &config);

    let lesson = generic_lesson("Lesson to rate.", "api");
    storage.create(&lesson).unwrap();

    engine.mark_helpful(&lesson.id, true, None).unwrap();
    let stats = storage.usage_stats(&lesson.id).unwrap();
    assert_eq!(stats.usage_count, 1);
    assert_eq!(stats.helpful_count, 1);

    let err = engine.mark_helpful("missing", true, None).unwrap_err();
    assert!(matches!(err, LoreError::LessonNotFound { .. }));
}
