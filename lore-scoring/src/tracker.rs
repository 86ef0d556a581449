//! RetrievalTracker — records lesson exposures and explicit feedback.
//!
//! Explicit feedback converges onto the most-recent usage row instead of
//! growing one row per call, bounding storage at the cost of feedback
//! history. The `append_history` config switch is the documented extension
//! point for callers that want the full trail instead.

use lore_core::config::TrackerConfig;
use lore_core::constants::EXPLICIT_FEEDBACK_CONTEXT;
use lore_core::errors::{LoreError, LoreResult};
use lore_core::lesson::NewUsage;
use lore_core::traits::ILessonStorage;

pub struct RetrievalTracker {
    config: TrackerConfig,
}

impl RetrievalTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Record explicit feedback for a lesson.
    ///
    /// Default policy: overwrite the `was_helpful` flag of the latest usage
    /// row in place; insert a fresh row only when the lesson has no usage
    /// yet. With `append_history` enabled every call inserts instead.
    pub fn record_feedback(
        &self,
        storage: &dyn ILessonStorage,
        lesson_id: &str,
        was_helpful: bool,
        session_id: Option<&str>,
    ) -> LoreResult<()> {
        if storage.get(lesson_id)?.is_none() {
            return Err(LoreError::LessonNotFound {
                id: lesson_id.to_string(),
            });
        }

        if !self.config.append_history {
            if let Some(latest) = storage.latest_usage(lesson_id)? {
                storage.set_usage_feedback(latest.id, was_helpful)?;
                return Ok(());
            }
        }

        storage.record_usage(&NewUsage {
            lesson_id: lesson_id.to_string(),
            query_context: Some(EXPLICIT_FEEDBACK_CONTEXT.to_string()),
            was_helpful: Some(was_helpful),
            session_id: session_id.map(str::to_string),
        })
    }

    /// Record an implicit "surfaced by a search" view with no feedback yet.
    /// Disabled tracking is a silent no-op, not an error.
    pub fn record_view(
        &self,
        storage: &dyn ILessonStorage,
        lesson_id: &str,
        query_context: Option<&str>,
        session_id: Option<&str>,
    ) -> LoreResult<()> {
        if !self.config.track_search_usage {
            return Ok(());
        }
        storage.record_usage(&NewUsage {
            lesson_id: lesson_id.to_string(),
            query_context: query_context.map(str::to_string),
            was_helpful: None,
            session_id: session_id.map(str::to_string),
        })
    }
}
