//! The single serialized write connection.
//!
//! All mutation goes through one mutex-guarded connection, so a
//! lookup-then-write sequence (the dedup merge-or-create decision) is never
//! interleaved with another writer in this process. The partial unique
//! indexes on the dedup keys are the cross-process backstop.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use lore_core::errors::{LoreError, LoreResult, StorageError};

use super::pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> LoreResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> LoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the write connection, holding the write lock
    /// for its duration.
    pub fn with_conn_sync<F, T>(&self, f: F) -> LoreResult<T>
    where
        F: FnOnce(&Connection) -> LoreResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            LoreError::Storage(StorageError::PoolPoisoned {
                details: e.to_string(),
            })
        })?;
        f(&guard)
    }
}
