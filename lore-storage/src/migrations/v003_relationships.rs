//! v003: typed relationship edges between lessons.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS lesson_relationships (
            lesson_id         TEXT NOT NULL,
            related_lesson_id TEXT NOT NULL,
            relationship_type TEXT NOT NULL,
            relevance_score   REAL NOT NULL DEFAULT 0.0,
            created_at        TEXT NOT NULL,
            PRIMARY KEY (lesson_id, related_lesson_id, relationship_type),
            FOREIGN KEY (lesson_id) REFERENCES lessons(id) ON DELETE CASCADE,
            FOREIGN KEY (related_lesson_id) REFERENCES lessons(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_relationships_related
            ON lesson_relationships(related_lesson_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
