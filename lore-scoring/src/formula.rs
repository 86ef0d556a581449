//! 3-factor weighted relevance formula.
//!
//! ```text
//! helpfulness_rate = helpful_count / usage_count        (0 when unused)
//! recency_weight   = max(0, 1 - days_since_creation / horizon)
//! normalized_usage = min(1, ln(usage_count + 1) / ln(cap + 1))
//! score = clamp(w_usage * normalized_usage
//!             + w_helpfulness * helpfulness_rate
//!             + w_recency * recency_weight, 0, 1)
//! ```
//!
//! Usage is log-scaled so the first uses matter most and saturates at the
//! configured cap; recency decays linearly to zero over the horizon.

use chrono::{DateTime, Utc};

use lore_core::config::ScoringConfig;
use lore_core::models::UsageStats;

/// Compute the composite relevance score for one lesson.
pub fn compute(
    stats: &UsageStats,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> f64 {
    compute_breakdown(stats, created_at, now, config).score
}

/// Each factor individually, for dry-run reporting and debugging.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub normalized_usage: f64,
    pub helpfulness_rate: f64,
    pub recency_weight: f64,
    pub score: f64,
}

/// Compute the score with a full breakdown of each factor.
pub fn compute_breakdown(
    stats: &UsageStats,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let helpfulness_rate = stats.helpfulness_rate();

    let days_since_creation = (now - created_at).num_days().max(0) as f64;
    let recency_weight = (1.0 - days_since_creation / config.recency_horizon_days as f64).max(0.0);

    let normalized_usage = (((stats.usage_count + 1) as f64).ln()
        / ((config.usage_cap + 1) as f64).ln())
    .min(1.0);

    let score = (config.usage_weight * normalized_usage
        + config.helpfulness_weight * helpfulness_rate
        + config.recency_weight * recency_weight)
        .clamp(0.0, 1.0);

    ScoreBreakdown {
        normalized_usage,
        helpfulness_rate,
        recency_weight,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stats(usage: u64, helpful: u64) -> UsageStats {
        UsageStats {
            usage_count: usage,
            helpful_count: helpful,
        }
    }

    #[test]
    fn unused_fresh_lesson_scores_only_recency() {
        let now = Utc::now();
        let breakdown = compute_breakdown(&stats(0, 0), now, now, &ScoringConfig::default());
        assert_eq!(breakdown.normalized_usage, 0.0);
        assert_eq!(breakdown.helpfulness_rate, 0.0);
        assert!((breakdown.recency_weight - 1.0).abs() < 1e-9);
        assert!((breakdown.score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn popular_recent_beats_old_mixed() {
        let now = Utc::now();
        let config = ScoringConfig::default();

        // 10 usages, all helpful, 10 days old.
        let popular = compute(&stats(10, 10), now - Duration::days(10), now, &config);
        // 5 usages, 3 helpful, 400 days old.
        let old = compute(&stats(5, 3), now - Duration::days(400), now, &config);

        assert!((popular - 0.733).abs() < 0.005, "popular = {popular}");
        assert!((old - 0.344).abs() < 0.005, "old = {old}");
        assert!(popular > old);
    }

    #[test]
    fn usage_saturates_at_the_cap() {
        let now = Utc::now();
        let config = ScoringConfig::default();
        let at_cap = compute_breakdown(&stats(1000, 0), now, now, &config);
        let past_cap = compute_breakdown(&stats(1_000_000, 0), now, now, &config);
        assert!((at_cap.normalized_usage - 1.0).abs() < 1e-9);
        assert!((past_cap.normalized_usage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recency_is_floored_at_zero() {
        let now = Utc::now();
        let breakdown = compute_breakdown(
            &stats(0, 0),
            now - Duration::days(4000),
            now,
            &ScoringConfig::default(),
        );
        assert_eq!(breakdown.recency_weight, 0.0);
    }
}
