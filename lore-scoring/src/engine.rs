//! RelevanceScorer — out-of-band batch job recomputing every lesson's score.
//!
//! Idempotent and interruptible: live mode overwrites whatever it visits, so
//! a partial run simply leaves the remainder for the next invocation. Dry-run
//! mode writes nothing and counts only material drifts.

use chrono::Utc;

use lore_core::config::ScoringConfig;
use lore_core::constants::DEFAULT_SCORER_BATCH_SIZE;
use lore_core::errors::LoreResult;
use lore_core::traits::ILessonStorage;

use crate::formula;

/// Outcome of one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorerReport {
    /// Lessons visited.
    pub processed: usize,
    /// Live mode: scores written. Dry run: scores that would change by more
    /// than the drift threshold.
    pub updated: usize,
}

pub struct RelevanceScorer {
    config: ScoringConfig,
}

impl RelevanceScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Walk all lessons (both pools) in fixed-size pages and recompute each
    /// score from current usage data.
    ///
    /// Live mode overwrites every visited lesson's stored score, changed or
    /// not. Dry-run mode performs no writes and reports how many scores
    /// drifted beyond the threshold.
    pub fn recompute_all(
        &self,
        storage: &dyn ILessonStorage,
        batch_size: usize,
        dry_run: bool,
    ) -> LoreResult<ScorerReport> {
        let batch_size = if batch_size == 0 {
            DEFAULT_SCORER_BATCH_SIZE
        } else {
            batch_size
        };

        let mut report = ScorerReport::default();
        let now = Utc::now();
        let mut offset = 0u64;

        loop {
            let page = storage.list_page(offset, batch_size as u64)?;
            if page.is_empty() {
                break;
            }

            for lesson in &page {
                let stats = storage.usage_stats(&lesson.id)?;
                let score = formula::compute(&stats, lesson.created_at, now, &self.config);
                report.processed += 1;

                if dry_run {
                    if (score - lesson.relevance_score).abs() > self.config.drift_threshold {
                        report.updated += 1;
                        tracing::debug!(
                            lesson_id = %lesson.id,
                            stored = lesson.relevance_score,
                            computed = score,
                            "dry run: score drift"
                        );
                    }
                } else {
                    storage.set_relevance_score(&lesson.id, score)?;
                    report.updated += 1;
                }
            }

            offset += page.len() as u64;
        }

        tracing::info!(
            processed = report.processed,
            updated = report.updated,
            dry_run,
            "relevance scoring run complete"
        );
        Ok(report)
    }
}
