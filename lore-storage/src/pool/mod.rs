//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::Path;

use lore_core::errors::LoreResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single write connection plus a round-robin pool of readers.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file. The writer opens
    /// first so the file exists (and is in WAL mode) before the read-only
    /// connections attach.
    pub fn open(path: &Path, read_pool_size: usize) -> LoreResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self { writer, readers })
    }

    /// Open an in-memory connection pool (for testing). In-memory readers
    /// are isolated databases and can't see the writer's changes, so callers
    /// route reads through the writer in this mode.
    pub fn open_in_memory(read_pool_size: usize) -> LoreResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let readers = ReadPool::open_in_memory(read_pool_size)?;
        Ok(Self { writer, readers })
    }
}
