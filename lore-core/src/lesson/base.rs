use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::LessonType;
use crate::hash;

/// The central entity: one deduplicated unit of knowledge.
///
/// Identity is the UUID; the dedup key is `content_hash` (globally for
/// generic lessons, scoped to `source_project` for project-detail lessons).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// UUID v4 identifier, stable across merges.
    pub id: String,
    /// Originating project. Legacy single-value field, retained for
    /// compatibility; always a member of `source_projects`.
    pub source_project: String,
    /// Every project that has ever contributed to this lesson's content.
    pub source_projects: BTreeSet<String>,
    /// True for the shared cross-project pool, false for project-scoped
    /// implementation notes.
    pub is_generic: bool,
    /// Provenance type.
    pub lesson_type: LessonType,
    /// Free-form category.
    pub category: Option<String>,
    /// Always derived from `category` via the classifier; never set without it.
    pub subcategory: Option<String>,
    /// First-write-wins short title.
    pub title: Option<String>,
    /// First-write-wins summary.
    pub summary: Option<String>,
    /// Case-sensitive tag set; order carries no meaning.
    pub tags: BTreeSet<String>,
    /// Open provenance map (file path, original index, ...).
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Full text body; the unit of hashing and full-text search.
    pub content: String,
    /// 64-hex SHA-256 digest of `content`; the dedup key.
    pub content_hash: String,
    /// Composite [0,1] ranking signal, recomputed by the scorer.
    pub relevance_score: f64,
    /// Non-null excludes the lesson from active search/browse by default.
    pub deprecated_at: Option<DateTime<Utc>>,
    /// Weak reference to the lesson that replaces this one.
    pub superseded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    /// Recompute `content_hash` from `content`. Must be called whenever
    /// `content` changes so the persisted invariant holds.
    pub fn rehash(&mut self) {
        self.content_hash = hash::hash(&self.content);
    }

    /// Whether this lesson participates in active search/browse.
    pub fn is_active(&self) -> bool {
        self.deprecated_at.is_none()
    }

    /// Whether the stored hash matches the content.
    pub fn hash_is_consistent(&self) -> bool {
        hash::equal(&self.content_hash, &hash::hash(&self.content))
    }
}

/// Identity equality: two lessons are equal if they have the same ID.
/// Content comparison goes through `content_hash`.
impl PartialEq for Lesson {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lesson {
        let now = Utc::now();
        let content = "Prefer prepared statements over string interpolation.".to_string();
        let content_hash = hash::hash(&content);
        Lesson {
            id: "l-1".to_string(),
            source_project: "api".to_string(),
            source_projects: BTreeSet::from(["api".to_string()]),
            is_generic: true,
            lesson_type: LessonType::Manual,
            category: Some("security".to_string()),
            subcategory: None,
            title: None,
            summary: None,
            tags: BTreeSet::new(),
            metadata: serde_json::Map::new(),
            content,
            content_hash,
            relevance_score: 0.0,
            deprecated_at: None,
            superseded_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn rehash_tracks_content() {
        let mut lesson = sample();
        assert!(lesson.hash_is_consistent());
        lesson.content.push_str(" Always.");
        assert!(!lesson.hash_is_consistent());
        lesson.rehash();
        assert!(lesson.hash_is_consistent());
    }

    #[test]
    fn equality_is_by_id() {
        let a = sample();
        let mut b = sample();
        b.content = "different".to_string();
        assert_eq!(a, b);
    }
}
