use chrono::{DateTime, Utc};

use crate::errors::LoreResult;
use crate::lesson::{Lesson, LessonRelationship, LessonUsage, Namespace, NewUsage, RelationshipType};
use crate::models::{CategoryStats, LessonFilter, StorageCapabilities, UsageStats};

/// The storage contract the engine crates are written against.
///
/// Full CRUD + dedup lookup + filtered query + full-text/substring search +
/// relationships + usage events + scoring writes + lifecycle + aggregation.
/// The merge-or-create decision in the ingestion pipeline is the single
/// writer path for lesson creation and content-hash mutation; implementations
/// must serialize concurrent writes to the same dedup key.
pub trait ILessonStorage: Send + Sync {
    // --- CRUD ---
    fn create(&self, lesson: &Lesson) -> LoreResult<()>;
    fn get(&self, id: &str) -> LoreResult<Option<Lesson>>;
    fn update(&self, lesson: &Lesson) -> LoreResult<()>;
    fn delete(&self, id: &str) -> LoreResult<()>;

    // --- Dedup lookup ---
    /// Canonical-lesson lookup: by hash alone for the generic pool, by
    /// (hash, project) for project-detail.
    fn find_by_hash(&self, content_hash: &str, namespace: &Namespace)
        -> LoreResult<Option<Lesson>>;

    // --- Query ---
    fn query(&self, filter: &LessonFilter) -> LoreResult<Vec<Lesson>>;
    /// Generic-pool lessons in one category; linker candidate source.
    fn query_generic_by_category(&self, category: &str) -> LoreResult<Vec<Lesson>>;
    /// Whether any lesson carries this value as its subcategory.
    fn subcategory_exists(&self, subcategory: &str) -> LoreResult<bool>;
    /// Stable page over every lesson in both pools, for batch jobs.
    fn list_page(&self, offset: u64, limit: u64) -> LoreResult<Vec<Lesson>>;
    fn count(&self) -> LoreResult<u64>;

    // --- Search ---
    /// Full-text match over content with a raw relevance score per hit
    /// (higher = more relevant). Empty when the capability is missing.
    fn search_fulltext(
        &self,
        query: &str,
        filter: &LessonFilter,
        limit: usize,
    ) -> LoreResult<Vec<(Lesson, f64)>>;
    /// Case-insensitive substring scan over content.
    fn search_substring(
        &self,
        query: &str,
        filter: &LessonFilter,
        limit: usize,
    ) -> LoreResult<Vec<Lesson>>;

    // --- Relationships ---
    fn add_relationship(&self, edge: &LessonRelationship) -> LoreResult<()>;
    fn get_relationships(
        &self,
        lesson_id: &str,
        rel_type: Option<RelationshipType>,
    ) -> LoreResult<Vec<LessonRelationship>>;
    /// Whether an edge of this type exists between the pair, in either
    /// direction.
    fn has_relationship(
        &self,
        lesson_id: &str,
        related_lesson_id: &str,
        rel_type: RelationshipType,
    ) -> LoreResult<bool>;

    // --- Usage events ---
    fn record_usage(&self, usage: &NewUsage) -> LoreResult<()>;
    fn latest_usage(&self, lesson_id: &str) -> LoreResult<Option<LessonUsage>>;
    fn set_usage_feedback(&self, usage_id: i64, was_helpful: bool) -> LoreResult<()>;
    fn usage_stats(&self, lesson_id: &str) -> LoreResult<UsageStats>;

    // --- Scoring ---
    fn set_relevance_score(&self, lesson_id: &str, score: f64) -> LoreResult<()>;

    // --- Lifecycle ---
    fn deprecate(&self, lesson_id: &str, when: DateTime<Utc>) -> LoreResult<()>;
    fn restore(&self, lesson_id: &str) -> LoreResult<()>;
    /// Point `old_id` at its replacement and deprecate it. Does not create a
    /// relationship edge; edges belong to the linker alone.
    fn supersede(&self, old_id: &str, new_id: &str) -> LoreResult<()>;

    // --- Aggregation ---
    fn category_statistics(&self) -> LoreResult<Vec<CategoryStats>>;

    // --- Capabilities ---
    fn capabilities(&self) -> StorageCapabilities;

    // --- Maintenance ---
    fn vacuum(&self) -> LoreResult<()>;
}
