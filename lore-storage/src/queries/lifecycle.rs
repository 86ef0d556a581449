//! Score writes and deprecation/supersession lifecycle updates.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use lore_core::errors::LoreResult;
use lore_core::LoreError;

use crate::to_storage_err;

/// Overwrite a lesson's stored relevance score.
pub fn set_relevance_score(conn: &Connection, lesson_id: &str, score: f64) -> LoreResult<()> {
    let rows = conn
        .execute(
            "UPDATE lessons SET relevance_score = ?2, updated_at = ?3 WHERE id = ?1",
            params![lesson_id, score, Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_found(rows, lesson_id)
}

/// Mark a lesson deprecated; it drops out of active search/browse.
pub fn deprecate(conn: &Connection, lesson_id: &str, when: DateTime<Utc>) -> LoreResult<()> {
    let rows = conn
        .execute(
            "UPDATE lessons SET deprecated_at = ?2, updated_at = ?3 WHERE id = ?1",
            params![lesson_id, when.to_rfc3339(), Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_found(rows, lesson_id)
}

/// Clear a lesson's deprecation timestamp.
pub fn restore(conn: &Connection, lesson_id: &str) -> LoreResult<()> {
    let rows = conn
        .execute(
            "UPDATE lessons SET deprecated_at = NULL, updated_at = ?2 WHERE id = ?1",
            params![lesson_id, Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_found(rows, lesson_id)
}

/// Point `old_id` at its replacement and deprecate it.
pub fn supersede(conn: &Connection, old_id: &str, new_id: &str) -> LoreResult<()> {
    let replacement_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM lessons WHERE id = ?1)",
            params![new_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if !replacement_exists {
        return Err(LoreError::LessonNotFound {
            id: new_id.to_string(),
        });
    }

    let now = Utc::now().to_rfc3339();
    let rows = conn
        .execute(
            "UPDATE lessons SET superseded_by = ?2, deprecated_at = ?3, updated_at = ?3
             WHERE id = ?1",
            params![old_id, new_id, now],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    ensure_found(rows, old_id)
}

fn ensure_found(rows: usize, lesson_id: &str) -> LoreResult<()> {
    if rows == 0 {
        Err(LoreError::LessonNotFound {
            id: lesson_id.to_string(),
        })
    } else {
        Ok(())
    }
}
