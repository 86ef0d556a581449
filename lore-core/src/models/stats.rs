use serde::{Deserialize, Serialize};

/// Usage aggregates for one lesson, consumed by the relevance scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub usage_count: u64,
    pub helpful_count: u64,
}

impl UsageStats {
    /// helpful / total, or 0 with no usage at all.
    pub fn helpfulness_rate(&self) -> f64 {
        if self.usage_count == 0 {
            0.0
        } else {
            self.helpful_count as f64 / self.usage_count as f64
        }
    }
}

/// Per-category aggregates for the browse/statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub total: u64,
    pub active: u64,
    pub deprecated: u64,
    pub avg_relevance: f64,
}
