//! Capability probing against the live schema.
//!
//! A missing capability puts the affected operation into degraded mode
//! instead of failing it: search falls back to substring scans without the
//! FTS index, ranking drops the stored-score term without the relevance
//! column, and the scorer sees zero usage without the usages table.

use rusqlite::Connection;

use lore_core::errors::LoreResult;
use lore_core::models::StorageCapabilities;

use crate::to_storage_err;

/// Probe the schema once after migration.
pub fn probe(conn: &Connection) -> LoreResult<StorageCapabilities> {
    let caps = StorageCapabilities {
        fulltext: table_exists(conn, "lesson_fts")?,
        relevance_score: column_exists(conn, "lessons", "relevance_score")?,
        usage_tracking: table_exists(conn, "lesson_usages")?,
    };

    if caps != StorageCapabilities::full() {
        tracing::warn!(?caps, "storage running with degraded capabilities");
    }
    Ok(caps)
}

fn table_exists(conn: &Connection, name: &str) -> LoreResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name = ?1)",
            [name],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> LoreResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| to_storage_err(e.to_string()))?
        .filter_map(|r| r.ok())
        .collect();
    Ok(columns.iter().any(|c| c == column))
}
