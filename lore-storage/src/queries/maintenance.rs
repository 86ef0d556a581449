//! Database maintenance operations.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

/// Checkpoint the WAL and rebuild the database file.
pub fn full_vacuum(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        PRAGMA wal_checkpoint(TRUNCATE);
        VACUUM;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
