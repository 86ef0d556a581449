use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lore_core::config::ScoringConfig;
use lore_core::models::UsageStats;
use lore_scoring::compute;

fn bench_formula(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let now = Utc::now();
    let created = now - Duration::days(120);
    let stats = UsageStats {
        usage_count: 250,
        helpful_count: 180,
    };

    c.bench_function("relevance_formula", |b| {
        b.iter(|| {
            compute(
                black_box(&stats),
                black_box(created),
                black_box(now),
                black_box(&config),
            )
        })
    });
}

criterion_group!(benches, bench_formula);
criterion_main!(benches);
