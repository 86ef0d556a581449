use serde::{Deserialize, Serialize};

/// One raw lesson record as pushed by a source project.
///
/// Everything is optional at this layer; the ingestion pipeline rejects
/// entries missing `content` or a valid `lesson_type` and runs explicit
/// extraction chains for the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLesson {
    /// Wire string, validated against `LessonType` during ingestion.
    pub lesson_type: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RawLesson {
    /// A non-empty trimmed content body, if present.
    pub fn content_text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}
