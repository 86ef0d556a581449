//! Per-category aggregates for the statistics endpoint.

use rusqlite::Connection;

use lore_core::errors::LoreResult;
use lore_core::models::CategoryStats;

use crate::to_storage_err;

/// Totals, active/deprecated split, and average relevance per category.
/// Uncategorized lessons are not reported.
pub fn category_statistics(conn: &Connection) -> LoreResult<Vec<CategoryStats>> {
    let mut stmt = conn
        .prepare(
            "SELECT category,
                    COUNT(*),
                    SUM(CASE WHEN deprecated_at IS NULL THEN 1 ELSE 0 END),
                    SUM(CASE WHEN deprecated_at IS NOT NULL THEN 1 ELSE 0 END),
                    AVG(relevance_score)
             FROM lessons
             WHERE category IS NOT NULL
             GROUP BY category
             ORDER BY category",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CategoryStats {
                category: row.get(0)?,
                total: row.get::<_, i64>(1)? as u64,
                active: row.get::<_, i64>(2)? as u64,
                deprecated: row.get::<_, i64>(3)? as u64,
                avg_relevance: row.get(4)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}
