use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded lesson access or feedback event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonUsage {
    /// Storage rowid.
    pub id: i64,
    pub lesson_id: String,
    pub query_context: Option<String>,
    /// None means "viewed but no explicit feedback yet".
    pub was_helpful: Option<bool>,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A usage event about to be inserted (no rowid yet).
#[derive(Debug, Clone)]
pub struct NewUsage {
    pub lesson_id: String,
    pub query_context: Option<String>,
    pub was_helpful: Option<bool>,
    pub session_id: Option<String>,
}
