//! Error taxonomy for the Lore engine.
//!
//! Entry-level failures in batch ingestion are collected as strings in the
//! batch report and never surface here; `LoreError` covers operation-level
//! outcomes the caller must handle explicitly.

pub mod storage_error;

pub use storage_error::StorageError;

/// Top-level error type. Every fallible operation in the workspace returns
/// `LoreResult<T>`.
#[derive(Debug, thiserror::Error)]
pub enum LoreError {
    #[error("lesson not found: {id}")]
    LessonNotFound { id: String },

    #[error("category is required")]
    CategoryRequired,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type LoreResult<T> = Result<T, LoreError>;
