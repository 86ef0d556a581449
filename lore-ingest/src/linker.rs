//! Tag-overlap similarity linking between generic lessons.
//!
//! Runs once per newly created generic lesson, synchronously in the create
//! path, bounded by the candidate cap. It never re-scans when tags change
//! later, and it never runs for lessons without a category or tags.

use std::collections::BTreeSet;

use chrono::Utc;

use lore_core::config::LinkerConfig;
use lore_core::errors::LoreResult;
use lore_core::lesson::{Lesson, LessonRelationship, RelationshipType};
use lore_core::traits::ILessonStorage;

/// Jaccard similarity of two tag sets: |intersection| / |union|.
/// Zero when either set is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Creates "related" edges between a new lesson and its closest peers.
pub struct SimilarityLinker {
    config: LinkerConfig,
}

impl SimilarityLinker {
    pub fn new(config: LinkerConfig) -> Self {
        Self { config }
    }

    /// Link a newly created generic lesson to up to `max_candidates` peers
    /// sharing its category and at least one tag. Returns how many edges
    /// were created.
    pub fn link_similar(
        &self,
        lesson: &Lesson,
        storage: &dyn ILessonStorage,
    ) -> LoreResult<usize> {
        let Some(category) = lesson.category.as_deref() else {
            return Ok(0);
        };
        if lesson.tags.is_empty() {
            return Ok(0);
        }

        let candidates: Vec<Lesson> = storage
            .query_generic_by_category(category)?
            .into_iter()
            .filter(|c| c.id != lesson.id)
            .filter(|c| c.tags.intersection(&lesson.tags).next().is_some())
            .take(self.config.max_candidates)
            .collect();

        let mut linked = 0;
        for candidate in candidates {
            let score = jaccard(&lesson.tags, &candidate.tags);
            if score < self.config.min_similarity {
                continue;
            }
            if storage.has_relationship(&lesson.id, &candidate.id, RelationshipType::Related)? {
                continue;
            }
            storage.add_relationship(&LessonRelationship {
                lesson_id: lesson.id.clone(),
                related_lesson_id: candidate.id.clone(),
                relationship_type: RelationshipType::Related,
                relevance_score: score,
                created_at: Utc::now(),
            })?;
            linked += 1;
        }

        if linked > 0 {
            tracing::debug!(lesson_id = %lesson.id, linked, "similarity links created");
        }
        Ok(linked)
    }
}
