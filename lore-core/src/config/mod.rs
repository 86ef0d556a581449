//! Engine configuration, deserializable from TOML.
//!
//! Every section has a `Default` impl backed by the `defaults` module, so a
//! missing or partial config file degrades to the stock behavior.

pub mod defaults;

use serde::{Deserialize, Serialize};

use crate::errors::{LoreError, LoreResult};

/// Top-level configuration for the Lore engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    pub scoring: ScoringConfig,
    pub linker: LinkerConfig,
    pub search: SearchConfig,
    pub tracker: TrackerConfig,
}

impl LoreConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> LoreResult<Self> {
        toml::from_str(input).map_err(|e| LoreError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Load a configuration from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> LoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| LoreError::InvalidConfig {
            reason: format!("read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}

/// Relevance scoring weights and horizons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the log-normalized usage count.
    pub usage_weight: f64,
    /// Weight of the helpfulness rate.
    pub helpfulness_weight: f64,
    /// Weight of the recency factor.
    pub recency_weight: f64,
    /// Days until the recency factor reaches zero.
    pub recency_horizon_days: u32,
    /// Usage count at which normalized usage saturates at 1.0.
    pub usage_cap: u64,
    /// Minimum score delta reported as a change in dry-run mode.
    pub drift_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            usage_weight: defaults::DEFAULT_USAGE_WEIGHT,
            helpfulness_weight: defaults::DEFAULT_HELPFULNESS_WEIGHT,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            recency_horizon_days: defaults::DEFAULT_RECENCY_HORIZON_DAYS,
            usage_cap: defaults::DEFAULT_USAGE_CAP,
            drift_threshold: defaults::DEFAULT_DRIFT_THRESHOLD,
        }
    }
}

/// Similarity linker bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Maximum candidate lessons compared per newly created lesson.
    pub max_candidates: usize,
    /// Jaccard threshold below which no edge is created.
    pub min_similarity: f64,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            max_candidates: defaults::DEFAULT_MAX_LINK_CANDIDATES,
            min_similarity: defaults::DEFAULT_MIN_LINK_SIMILARITY,
        }
    }
}

/// Search ranking weights and result bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Weight of normalized full-text relevance in hybrid ranking.
    pub fulltext_weight: f64,
    /// Weight of the stored relevance score in hybrid ranking.
    pub stored_score_weight: f64,
    /// Result limit when the caller does not supply one.
    pub default_limit: usize,
    /// Maximum related lessons attached per result.
    pub related_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fulltext_weight: defaults::DEFAULT_FULLTEXT_WEIGHT,
            stored_score_weight: defaults::DEFAULT_STORED_SCORE_WEIGHT,
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
            related_limit: defaults::DEFAULT_RELATED_LIMIT,
        }
    }
}

/// Usage/feedback tracking behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// When true, explicit feedback always appends a new usage row instead of
    /// overwriting the latest one. Off by default for compatibility with the
    /// original storage-bounding behavior.
    pub append_history: bool,
    /// When true, the search engine records an implicit usage row for every
    /// lesson it surfaces on a keyword query.
    pub track_search_usage: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            append_history: false,
            track_search_usage: true,
        }
    }
}
