use serde::{Deserialize, Serialize};

/// What the underlying datastore can do, probed once at engine startup.
///
/// A missing capability is degraded mode, not an error: search falls back to
/// substring matching without a full-text index, ranking drops the stored
/// score term without the relevance column, and the scorer treats every
/// lesson as unused without the usage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCapabilities {
    /// A full-text index over lesson content with a relevance score output.
    pub fulltext: bool,
    /// The persisted relevance-score column.
    pub relevance_score: bool,
    /// The usage-event table feeding the scorer.
    pub usage_tracking: bool,
}

impl StorageCapabilities {
    /// Everything available — the normal case for a migrated schema.
    pub fn full() -> Self {
        Self {
            fulltext: true,
            relevance_score: true,
            usage_tracking: true,
        }
    }
}
