//! Versioned schema migrations, tracked via `PRAGMA user_version`.

pub mod v001_lessons;
pub mod v002_lesson_fts;
pub mod v003_relationships;
pub mod v004_usages;

use rusqlite::Connection;

use lore_core::errors::{LoreError, LoreResult, StorageError};

use crate::to_storage_err;

/// All migrations in order. Each runs at most once.
const MIGRATIONS: &[(u32, fn(&Connection) -> LoreResult<()>)] = &[
    (1, v001_lessons::migrate),
    (2, v002_lesson_fts::migrate),
    (3, v003_relationships::migrate),
    (4, v004_usages::migrate),
];

/// Run every pending migration inside its own transaction.
pub fn run_migrations(conn: &Connection) -> LoreResult<()> {
    let current = user_version(conn)?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        tracing::info!(version, "running migration");

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration v{version} begin: {e}")))?;

        if let Err(e) = migrate(&tx) {
            let _ = tx.rollback();
            return Err(LoreError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            }));
        }

        tx.pragma_update(None, "user_version", *version)
            .map_err(|e| to_storage_err(format!("migration v{version} stamp: {e}")))?;
        tx.commit()
            .map_err(|e| to_storage_err(format!("migration v{version} commit: {e}")))?;
    }

    Ok(())
}

/// Read the current schema version.
pub fn user_version(conn: &Connection) -> LoreResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
