//! Relationship edge CRUD.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use lore_core::errors::LoreResult;
use lore_core::lesson::{LessonRelationship, RelationshipType};

use crate::to_storage_err;

/// Add a relationship edge. The (lesson, related, type) triple is unique and
/// edges are never updated, so an existing edge is left untouched.
pub fn add_relationship(conn: &Connection, edge: &LessonRelationship) -> LoreResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO lesson_relationships
            (lesson_id, related_lesson_id, relationship_type, relevance_score, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            edge.lesson_id,
            edge.related_lesson_id,
            edge.relationship_type.as_str(),
            edge.relevance_score,
            edge.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Get relationships touching a lesson (either direction), optionally
/// filtered by type.
pub fn get_relationships(
    conn: &Connection,
    lesson_id: &str,
    rel_type: Option<RelationshipType>,
) -> LoreResult<Vec<LessonRelationship>> {
    let (sql, dyn_params): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match rel_type {
        Some(rt) => (
            "SELECT lesson_id, related_lesson_id, relationship_type, relevance_score, created_at
             FROM lesson_relationships
             WHERE (lesson_id = ?1 OR related_lesson_id = ?1) AND relationship_type = ?2"
                .to_string(),
            vec![
                Box::new(lesson_id.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(rt.as_str().to_string()) as Box<dyn rusqlite::types::ToSql>,
            ],
        ),
        None => (
            "SELECT lesson_id, related_lesson_id, relationship_type, relevance_score, created_at
             FROM lesson_relationships
             WHERE lesson_id = ?1 OR related_lesson_id = ?1"
                .to_string(),
            vec![Box::new(lesson_id.to_string()) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        dyn_params.iter().map(|p| p.as_ref()).collect();

    let rows = stmt
        .query_map(params_refs.as_slice(), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (lesson_id, related_lesson_id, rel_type_str, relevance_score, created_at_str) =
            row.map_err(|e| to_storage_err(e.to_string()))?;

        let relationship_type = RelationshipType::from_str(&rel_type_str)
            .map_err(|e| to_storage_err(format!("parse relationship type: {e}")))?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| to_storage_err(format!("parse created_at: {e}")))?;

        results.push(LessonRelationship {
            lesson_id,
            related_lesson_id,
            relationship_type,
            relevance_score,
            created_at,
        });
    }
    Ok(results)
}

/// Whether an edge of this type exists between the pair, in either direction.
pub fn has_relationship(
    conn: &Connection,
    lesson_id: &str,
    related_lesson_id: &str,
    rel_type: RelationshipType,
) -> LoreResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM lesson_relationships
                WHERE relationship_type = ?3
                  AND ((lesson_id = ?1 AND related_lesson_id = ?2)
                    OR (lesson_id = ?2 AND related_lesson_id = ?1))
             )",
            params![lesson_id, related_lesson_id, rel_type.as_str()],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists)
}
