use chrono::{Duration, Utc};
use lore_core::config::ScoringConfig;
use lore_core::models::UsageStats;
use lore_scoring::compute_breakdown;
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_is_always_in_unit_interval(
        usage in 0u64..100_000,
        helpful_fraction in 0u64..=100,
        age_days in 0i64..10_000,
    ) {
        let helpful = usage * helpful_fraction / 100;
        let stats = UsageStats { usage_count: usage, helpful_count: helpful };
        let now = Utc::now();
        let breakdown = compute_breakdown(
            &stats,
            now - Duration::days(age_days),
            now,
            &ScoringConfig::default(),
        );
        prop_assert!((0.0..=1.0).contains(&breakdown.score));
        prop_assert!((0.0..=1.0).contains(&breakdown.normalized_usage));
        prop_assert!((0.0..=1.0).contains(&breakdown.helpfulness_rate));
        prop_assert!((0.0..=1.0).contains(&breakdown.recency_weight));
    }

    #[test]
    fn more_usage_never_lowers_the_score(
        usage in 0u64..10_000,
        extra in 1u64..1_000,
        age_days in 0i64..1_000,
    ) {
        let now = Utc::now();
        let created = now - Duration::days(age_days);
        let config = ScoringConfig::default();
        let base = compute_breakdown(
            &UsageStats { usage_count: usage, helpful_count: usage },
            created, now, &config,
        );
        let more = compute_breakdown(
            &UsageStats { usage_count: usage + extra, helpful_count: usage + extra },
            created, now, &config,
        );
        prop_assert!(more.score >= base.score - 1e-12);
    }

    #[test]
    fn older_lessons_never_outscore_fresh_ones_on_recency(
        age_a in 0i64..5_000,
        age_b in 0i64..5_000,
    ) {
        let now = Utc::now();
        let config = ScoringConfig::default();
        let stats = UsageStats::default();
        let a = compute_breakdown(&stats, now - Duration::days(age_a), now, &config);
        let b = compute_breakdown(&stats, now - Duration::days(age_b), now, &config);
        if age_a <= age_b {
            prop_assert!(a.recency_weight >= b.recency_weight);
        }
    }
}
