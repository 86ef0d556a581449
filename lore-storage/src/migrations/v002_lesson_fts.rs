//! v002: external-content FTS5 index over lesson bodies, kept in sync by
//! triggers.
//!
//! If this build of SQLite lacks FTS5 the migration logs and succeeds
//! without the index; search then runs in substring-fallback mode (the
//! capability probe reports `fulltext = false`).

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    let created = conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS lesson_fts USING fts5(
            content,
            content='lessons',
            content_rowid='rowid'
        );
        ",
    );

    if let Err(e) = created {
        tracing::warn!(error = %e, "FTS5 unavailable; full-text search disabled");
        return Ok(());
    }

    conn.execute_batch(
        "
        CREATE TRIGGER IF NOT EXISTS lessons_fts_insert
        AFTER INSERT ON lessons BEGIN
            INSERT INTO lesson_fts(rowid, content)
            VALUES (new.rowid, new.content);
        END;

        CREATE TRIGGER IF NOT EXISTS lessons_fts_delete
        AFTER DELETE ON lessons BEGIN
            INSERT INTO lesson_fts(lesson_fts, rowid, content)
            VALUES ('delete', old.rowid, old.content);
        END;

        CREATE TRIGGER IF NOT EXISTS lessons_fts_update
        AFTER UPDATE OF content ON lessons BEGIN
            INSERT INTO lesson_fts(lesson_fts, rowid, content)
            VALUES ('delete', old.rowid, old.content);
            INSERT INTO lesson_fts(rowid, content)
            VALUES (new.rowid, new.content);
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
