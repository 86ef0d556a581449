//! v004: append-only usage events feeding the relevance scorer.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS lesson_usages (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            lesson_id     TEXT NOT NULL,
            query_context TEXT,
            was_helpful   INTEGER,
            session_id    TEXT,
            created_at    TEXT NOT NULL,
            FOREIGN KEY (lesson_id) REFERENCES lessons(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_usages_lesson
            ON lesson_usages(lesson_id, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
