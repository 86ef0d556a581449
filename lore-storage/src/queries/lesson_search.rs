//! Full-text (FTS5/bm25) and substring-fallback search over lesson content.

use rusqlite::Connection;

use lore_core::errors::LoreResult;
use lore_core::lesson::Lesson;
use lore_core::models::LessonFilter;

use super::filter_sql::{filter_clauses, where_suffix};
use super::lesson_crud::{parse_lesson_row, LESSON_COLUMNS};
use super::lesson_query::collect_lessons;
use crate::to_storage_err;

/// Quote every token of a free-text query for FTS5 MATCH.
///
/// Raw user input is not valid FTS5 query syntax (apostrophes, dashes, and
/// operators all break it), so each alphanumeric token is double-quoted and
/// the tokens are implicitly AND-combined. Returns None when nothing
/// tokenizable remains.
pub fn sanitize_match_query(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Search lessons via the FTS5 index, returning bm25-derived raw relevance
/// per hit (higher = better). Zero hits on a cold/small dataset is a normal
/// outcome; the caller decides whether to fall back.
pub fn search_fulltext(
    conn: &Connection,
    query: &str,
    filter: &LessonFilter,
    limit: usize,
) -> LoreResult<Vec<(Lesson, f64)>> {
    let Some(match_query) = sanitize_match_query(query) else {
        return Ok(Vec::new());
    };

    let (clauses, dyn_params) = filter_clauses(filter, 2);
    let limit_idx = dyn_params.len() + 2;
    let sql = format!(
        "SELECT {cols}, bm25(lesson_fts) AS fts_rank
         FROM lesson_fts
         JOIN lessons m ON m.rowid = lesson_fts.rowid
         WHERE lesson_fts MATCH ?1{filters}
         ORDER BY fts_rank
         LIMIT ?{limit_idx}",
        cols = qualified_columns(),
        filters = where_suffix(&clauses, true),
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut params_refs: Vec<&dyn rusqlite::types::ToSql> = vec![&match_query];
    params_refs.extend(dyn_params.iter().map(|p| p.as_ref()));
    let limit_param = limit as i64;
    params_refs.push(&limit_param);

    let rows = stmt
        .query_map(params_refs.as_slice(), |row| {
            let rank: f64 = row.get(18)?;
            Ok((parse_lesson_row(row), rank))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (lesson, rank) = row.map_err(|e| to_storage_err(e.to_string()))?;
        // bm25 assigns smaller (more negative) values to better matches;
        // negate so callers see higher = more relevant.
        results.push((lesson?, -rank));
    }
    Ok(results)
}

/// Case-insensitive substring scan over content, newest first.
///
/// This is the cold-dataset fallback: it returns results even when the
/// full-text index has no match for the query terms.
pub fn search_substring(
    conn: &Connection,
    query: &str,
    filter: &LessonFilter,
    limit: usize,
) -> LoreResult<Vec<Lesson>> {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{escaped}%");

    let (clauses, dyn_params) = filter_clauses(filter, 2);
    let limit_idx = dyn_params.len() + 2;
    let sql = format!(
        "SELECT {LESSON_COLUMNS} FROM lessons
         WHERE content LIKE ?1 ESCAPE '\\'{filters}
         ORDER BY created_at DESC
         LIMIT ?{limit_idx}",
        filters = where_suffix(&clauses, true),
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut params_refs: Vec<&dyn rusqlite::types::ToSql> = vec![&pattern];
    params_refs.extend(dyn_params.iter().map(|p| p.as_ref()));
    let limit_param = limit as i64;
    params_refs.push(&limit_param);

    collect_lessons(&mut stmt, params_refs.as_slice())
}

/// LESSON_COLUMNS qualified with the joined table alias.
fn qualified_columns() -> String {
    LESSON_COLUMNS
        .split(',')
        .map(|c| format!("m.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
