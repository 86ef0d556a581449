//! Hybrid ranking: normalized full-text relevance blended with the stored
//! relevance score.

use lore_core::config::SearchConfig;
use lore_core::lesson::Lesson;

/// Blend full-text hits with stored relevance and sort descending.
///
/// Raw full-text scores are normalized against the best hit in this result
/// set so both terms live on a comparable [0,1] scale. Without the stored
/// score capability the ranking uses full-text relevance alone. Ties break
/// to the newer lesson.
pub fn hybrid_rank(
    hits: Vec<(Lesson, f64)>,
    use_stored_score: bool,
    config: &SearchConfig,
) -> Vec<(Lesson, f64)> {
    let max_raw = hits
        .iter()
        .map(|(_, raw)| *raw)
        .fold(f64::EPSILON, f64::max);

    let mut ranked: Vec<(Lesson, f64)> = hits
        .into_iter()
        .map(|(lesson, raw)| {
            let fulltext = (raw / max_raw).clamp(0.0, 1.0);
            let score = if use_stored_score {
                config.fulltext_weight * fulltext
                    + config.stored_score_weight * lesson.relevance_score
            } else {
                fulltext
            };
            (lesson, score)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.0.created_at.cmp(&a.0.created_at))
    });
    ranked
}
