//! v001: the lessons table with partial unique indexes on the dedup keys.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

/// Create the lessons table.
///
/// The two partial unique indexes enforce canonicality at the storage layer:
/// one generic lesson per content hash, one project-detail lesson per
/// (content hash, source project). A race between two identical submissions
/// surfaces as a constraint violation, never as two canonical rows.
pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS lessons (
            id              TEXT PRIMARY KEY,
            lesson_type     TEXT NOT NULL,
            is_generic      INTEGER NOT NULL,
            source_project  TEXT NOT NULL,
            source_projects TEXT NOT NULL,
            category        TEXT,
            subcategory     TEXT,
            title           TEXT,
            summary         TEXT,
            tags            TEXT NOT NULL,
            metadata        TEXT NOT NULL,
            content         TEXT NOT NULL,
            content_hash    TEXT NOT NULL,
            relevance_score REAL NOT NULL DEFAULT 0.0,
            deprecated_at   TEXT,
            superseded_by   TEXT,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_lessons_generic_hash
            ON lessons(content_hash) WHERE is_generic = 1;
        CREATE UNIQUE INDEX IF NOT EXISTS idx_lessons_project_hash
            ON lessons(content_hash, source_project) WHERE is_generic = 0;

        CREATE INDEX IF NOT EXISTS idx_lessons_category ON lessons(category);
        CREATE INDEX IF NOT EXISTS idx_lessons_subcategory ON lessons(subcategory);
        CREATE INDEX IF NOT EXISTS idx_lessons_relevance ON lessons(relevance_score);
        CREATE INDEX IF NOT EXISTS idx_lessons_created ON lessons(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
