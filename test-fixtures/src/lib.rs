//! Shared builders for test lessons and raw ingestion records.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use lore_core::hash;
use lore_core::lesson::{Lesson, LessonType, RawLesson};

/// Build a generic lesson with a consistent content hash.
pub fn generic_lesson(content: &str, source_project: &str) -> Lesson {
    let now = Utc::now();
    Lesson {
        id: uuid::Uuid::new_v4().to_string(),
        source_project: source_project.to_string(),
        source_projects: BTreeSet::from([source_project.to_string()]),
        is_generic: true,
        lesson_type: LessonType::Manual,
        category: None,
        subcategory: None,
        title: None,
        summary: None,
        tags: BTreeSet::new(),
        metadata: serde_json::Map::new(),
        content: content.to_string(),
        content_hash: hash::hash(content),
        relevance_score: 0.0,
        deprecated_at: None,
        superseded_by: None,
        created_at: now,
        updated_at: now,
    }
}

/// Build a project-detail lesson.
pub fn project_lesson(content: &str, source_project: &str) -> Lesson {
    let mut lesson = generic_lesson(content, source_project);
    lesson.is_generic = false;
    lesson.lesson_type = LessonType::ProjectDetail;
    lesson
}

/// Attach a category and tags to a lesson.
pub fn with_category_and_tags(mut lesson: Lesson, category: &str, tags: &[&str]) -> Lesson {
    lesson.category = Some(category.to_string());
    lesson.tags = tags.iter().map(|t| t.to_string()).collect();
    lesson
}

/// Backdate a lesson's creation timestamp by whole days.
pub fn created_days_ago(mut lesson: Lesson, days: i64) -> Lesson {
    lesson.created_at = Utc::now() - Duration::days(days);
    lesson.updated_at = lesson.created_at;
    lesson
}

/// Build a minimal valid raw lesson for ingestion.
pub fn raw_lesson(content: &str) -> RawLesson {
    RawLesson {
        lesson_type: Some("manual".to_string()),
        content: Some(content.to_string()),
        ..RawLesson::default()
    }
}

/// Build a raw lesson with category and tags.
pub fn raw_lesson_tagged(content: &str, category: &str, tags: &[&str]) -> RawLesson {
    RawLesson {
        lesson_type: Some("manual".to_string()),
        content: Some(content.to_string()),
        category: Some(category.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..RawLesson::default()
    }
}
