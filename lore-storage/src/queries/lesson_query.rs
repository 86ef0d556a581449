//! Dedup lookup, filtered browse queries, paging, and existence probes.

use rusqlite::{params, Connection, OptionalExtension};

use lore_core::errors::LoreResult;
use lore_core::lesson::{Lesson, Namespace};
use lore_core::models::LessonFilter;

use super::filter_sql::{filter_clauses, where_suffix};
use super::lesson_crud::{parse_lesson_row, LESSON_COLUMNS};
use crate::to_storage_err;

/// Canonical-lesson lookup by dedup key.
///
/// Generic pool: by content hash alone, across all projects.
/// Project-detail pool: by (content hash, source project).
pub fn find_by_hash(
    conn: &Connection,
    content_hash: &str,
    namespace: &Namespace,
) -> LoreResult<Option<Lesson>> {
    let (sql, dyn_params): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match namespace {
        Namespace::Generic => (
            format!(
                "SELECT {LESSON_COLUMNS} FROM lessons
                 WHERE content_hash = ?1 AND is_generic = 1"
            ),
            vec![Box::new(content_hash.to_string()) as Box<dyn rusqlite::types::ToSql>],
        ),
        Namespace::ProjectDetail(project) => (
            format!(
                "SELECT {LESSON_COLUMNS} FROM lessons
                 WHERE content_hash = ?1 AND is_generic = 0 AND source_project = ?2"
            ),
            vec![
                Box::new(content_hash.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(project.clone()) as Box<dyn rusqlite::types::ToSql>,
            ],
        ),
    };

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        dyn_params.iter().map(|p| p.as_ref()).collect();

    let result = stmt
        .query_row(params_refs.as_slice(), |row| Ok(parse_lesson_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(lesson)) => Ok(Some(lesson)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Filtered browse query, ranked by stored relevance then recency.
pub fn query(conn: &Connection, filter: &LessonFilter) -> LoreResult<Vec<Lesson>> {
    let (clauses, dyn_params) = filter_clauses(filter, 1);
    let sql = format!(
        "SELECT {LESSON_COLUMNS} FROM lessons{}
         ORDER BY relevance_score DESC, created_at DESC",
        where_suffix(&clauses, false)
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        dyn_params.iter().map(|p| p.as_ref()).collect();

    collect_lessons(&mut stmt, params_refs.as_slice())
}

/// Generic-pool lessons in one category; the similarity linker's candidate
/// source.
pub fn query_generic_by_category(conn: &Connection, category: &str) -> LoreResult<Vec<Lesson>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons
             WHERE is_generic = 1 AND category = ?1 AND deprecated_at IS NULL
             ORDER BY created_at DESC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    collect_lessons(&mut stmt, &[&category])
}

/// Whether any lesson carries this value as its subcategory.
pub fn subcategory_exists(conn: &Connection, subcategory: &str) -> LoreResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM lessons WHERE subcategory = ?1)",
            params![subcategory],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists)
}

/// Stable page over every lesson in both pools, for batch jobs.
pub fn list_page(conn: &Connection, offset: u64, limit: u64) -> LoreResult<Vec<Lesson>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons
             ORDER BY created_at ASC, id ASC
             LIMIT ?1 OFFSET ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    collect_lessons(&mut stmt, &[&(limit as i64), &(offset as i64)])
}

/// Total lesson count across both pools.
pub fn count(conn: &Connection) -> LoreResult<u64> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM lessons", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as u64)
}

/// Helper: collect lessons from a prepared statement.
pub(crate) fn collect_lessons(
    stmt: &mut rusqlite::Statement<'_>,
    params: &[&dyn rusqlite::types::ToSql],
) -> LoreResult<Vec<Lesson>> {
    let rows = stmt
        .query_map(params, |row| Ok(parse_lesson_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let lesson = row.map_err(|e| to_storage_err(e.to_string()))??;
        results.push(lesson);
    }
    Ok(results)
}
