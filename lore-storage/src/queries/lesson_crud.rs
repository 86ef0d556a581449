//! Insert, get, update, delete for lessons.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use lore_core::errors::LoreResult;
use lore_core::lesson::{Lesson, LessonType};
use lore_core::LoreError;

use crate::to_storage_err;

/// The base SELECT columns for all lesson queries (18 columns, indices 0-17).
pub(crate) const LESSON_COLUMNS: &str =
    "id, lesson_type, is_generic, source_project, source_projects,
     category, subcategory, title, summary, tags, metadata,
     content, content_hash, relevance_score, deprecated_at,
     superseded_by, created_at, updated_at";

/// Insert a single lesson. Wrapped in a transaction so the row and the FTS
/// trigger writes are all-or-nothing.
pub fn insert_lesson(conn: &Connection, lesson: &Lesson) -> LoreResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_lesson begin: {e}")))?;

    match insert_lesson_inner(&tx, lesson) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_lesson commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_lesson_inner(conn: &Connection, lesson: &Lesson) -> LoreResult<()> {
    let source_projects_json =
        serde_json::to_string(&lesson.source_projects).map_err(|e| to_storage_err(e.to_string()))?;
    let tags_json =
        serde_json::to_string(&lesson.tags).map_err(|e| to_storage_err(e.to_string()))?;
    let metadata_json =
        serde_json::to_string(&lesson.metadata).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO lessons (
            id, lesson_type, is_generic, source_project, source_projects,
            category, subcategory, title, summary, tags, metadata,
            content, content_hash, relevance_score, deprecated_at,
            superseded_by, created_at, updated_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18
        )",
        params![
            lesson.id,
            lesson.lesson_type.as_str(),
            lesson.is_generic as i32,
            lesson.source_project,
            source_projects_json,
            lesson.category,
            lesson.subcategory,
            lesson.title,
            lesson.summary,
            tags_json,
            metadata_json,
            lesson.content,
            lesson.content_hash,
            lesson.relevance_score,
            lesson.deprecated_at.map(|t| t.to_rfc3339()),
            lesson.superseded_by,
            lesson.created_at.to_rfc3339(),
            lesson.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}

/// Get a single lesson by ID.
pub fn get_lesson(conn: &Connection, id: &str) -> LoreResult<Option<Lesson>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![id], |row| Ok(parse_lesson_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(lesson)) => Ok(Some(lesson)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Update an existing lesson in full.
pub fn update_lesson(conn: &Connection, lesson: &Lesson) -> LoreResult<()> {
    let source_projects_json =
        serde_json::to_string(&lesson.source_projects).map_err(|e| to_storage_err(e.to_string()))?;
    let tags_json =
        serde_json::to_string(&lesson.tags).map_err(|e| to_storage_err(e.to_string()))?;
    let metadata_json =
        serde_json::to_string(&lesson.metadata).map_err(|e| to_storage_err(e.to_string()))?;

    let rows = conn
        .execute(
            "UPDATE lessons SET
                lesson_type = ?2, is_generic = ?3, source_project = ?4,
                source_projects = ?5, category = ?6, subcategory = ?7,
                title = ?8, summary = ?9, tags = ?10, metadata = ?11,
                content = ?12, content_hash = ?13, relevance_score = ?14,
                deprecated_at = ?15, superseded_by = ?16, updated_at = ?17
             WHERE id = ?1",
            params![
                lesson.id,
                lesson.lesson_type.as_str(),
                lesson.is_generic as i32,
                lesson.source_project,
                source_projects_json,
                lesson.category,
                lesson.subcategory,
                lesson.title,
                lesson.summary,
                tags_json,
                metadata_json,
                lesson.content,
                lesson.content_hash,
                lesson.relevance_score,
                lesson.deprecated_at.map(|t| t.to_rfc3339()),
                lesson.superseded_by,
                lesson.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(LoreError::LessonNotFound {
            id: lesson.id.clone(),
        });
    }
    Ok(())
}

/// Delete a lesson and cascade its relationships and usage events.
pub fn delete_lesson(conn: &Connection, id: &str) -> LoreResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("delete_lesson begin: {e}")))?;

    match delete_lesson_inner(&tx, id) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("delete_lesson commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn delete_lesson_inner(conn: &Connection, id: &str) -> LoreResult<()> {
    conn.execute(
        "DELETE FROM lesson_relationships WHERE lesson_id = ?1 OR related_lesson_id = ?1",
        params![id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    // The usages table may be absent in a degraded schema.
    let _ = conn.execute("DELETE FROM lesson_usages WHERE lesson_id = ?1", params![id]);
    conn.execute("DELETE FROM lessons WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Parse a row from the lessons table into a Lesson.
pub(crate) fn parse_lesson_row(row: &rusqlite::Row<'_>) -> LoreResult<Lesson> {
    let lesson_type_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let source_projects_json: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let tags_json: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;
    let metadata_json: String = row.get(10).map_err(|e| to_storage_err(e.to_string()))?;

    let lesson_type: LessonType = lesson_type_str
        .parse()
        .map_err(|e: String| to_storage_err(format!("parse lesson_type: {e}")))?;
    let source_projects: BTreeSet<String> = serde_json::from_str(&source_projects_json)
        .map_err(|e| to_storage_err(format!("parse source_projects: {e}")))?;
    let tags: BTreeSet<String> =
        serde_json::from_str(&tags_json).map_err(|e| to_storage_err(format!("parse tags: {e}")))?;
    let metadata: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&metadata_json)
            .map_err(|e| to_storage_err(format!("parse metadata: {e}")))?;

    let created_at_str: String = row.get(16).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_at_str: String = row.get(17).map_err(|e| to_storage_err(e.to_string()))?;
    let deprecated_at_str: Option<String> =
        row.get(14).map_err(|e| to_storage_err(e.to_string()))?;

    let parse_dt = |s: &str| -> LoreResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
    };

    Ok(Lesson {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        lesson_type,
        is_generic: row
            .get::<_, i32>(2)
            .map_err(|e| to_storage_err(e.to_string()))?
            != 0,
        source_project: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        source_projects,
        category: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        subcategory: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        title: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        summary: row.get(8).map_err(|e| to_storage_err(e.to_string()))?,
        tags,
        metadata,
        content: row.get(11).map_err(|e| to_storage_err(e.to_string()))?,
        content_hash: row.get(12).map_err(|e| to_storage_err(e.to_string()))?,
        relevance_score: row.get(13).map_err(|e| to_storage_err(e.to_string()))?,
        deprecated_at: deprecated_at_str.as_deref().map(parse_dt).transpose()?,
        superseded_by: row.get(15).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_dt(&created_at_str)?,
        updated_at: parse_dt(&updated_at_str)?,
    })
}
