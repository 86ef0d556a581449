//! # lore-storage
//!
//! SQLite persistence for the Lore knowledge base: connection pool (single
//! writer + read pool), versioned migrations, WAL pragmas, an FTS5 index over
//! lesson content, and the `StorageEngine` implementing `ILessonStorage`.

pub mod capabilities;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use lore_core::errors::{LoreError, StorageError};

/// Wrap an SQLite-layer message into the typed storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> LoreError {
    LoreError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}
