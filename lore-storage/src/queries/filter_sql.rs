//! Shared WHERE-clause rendering for lesson filters.
//!
//! Search and browse queries AND-combine the same four filters (namespace,
//! active-only, category target, tags), so the SQL is built in one place.

use lore_core::lesson::Namespace;
use lore_core::models::{FilterTarget, LessonFilter};

pub(crate) type SqlParam = Box<dyn rusqlite::types::ToSql>;

/// Render a filter into AND-joined clauses and their bound params.
/// Placeholders are numbered starting at `start_index` (1-based).
pub(crate) fn filter_clauses(
    filter: &LessonFilter,
    start_index: usize,
) -> (Vec<String>, Vec<SqlParam>) {
    let mut clauses = Vec::new();
    let mut params: Vec<SqlParam> = Vec::new();
    let mut idx = start_index;

    match &filter.namespace {
        Some(Namespace::Generic) => clauses.push("is_generic = 1".to_string()),
        Some(Namespace::ProjectDetail(project)) => {
            clauses.push(format!("(is_generic = 0 AND source_project = ?{idx})"));
            params.push(Box::new(project.clone()));
            idx += 1;
        }
        None => {}
    }

    if filter.active_only {
        clauses.push("deprecated_at IS NULL".to_string());
    }

    match &filter.target {
        Some(FilterTarget::Category(category)) => {
            clauses.push(format!("category = ?{idx}"));
            params.push(Box::new(category.clone()));
            idx += 1;
        }
        Some(FilterTarget::Subcategory(subcategory)) => {
            clauses.push(format!("subcategory = ?{idx}"));
            params.push(Box::new(subcategory.clone()));
            idx += 1;
        }
        None => {}
    }

    if !filter.tags.is_empty() {
        // Tags are stored as a JSON array; a lesson matches if it carries ANY
        // of the supplied tags.
        let mut ors = Vec::new();
        for tag in &filter.tags {
            ors.push(format!("tags LIKE ?{idx}"));
            params.push(Box::new(format!("%\"{tag}\"%")));
            idx += 1;
        }
        clauses.push(format!("({})", ors.join(" OR ")));
    }

    (clauses, params)
}

/// Join rendered clauses into a `WHERE ...` / `AND ...` suffix.
pub(crate) fn where_suffix(clauses: &[String], leading_and: bool) -> String {
    if clauses.is_empty() {
        String::new()
    } else if leading_and {
        format!(" AND {}", clauses.join(" AND "))
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}
