//! Usage event writes and the aggregates feeding the scorer.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use lore_core::errors::LoreResult;
use lore_core::lesson::{LessonUsage, NewUsage};
use lore_core::models::UsageStats;

use crate::to_storage_err;

/// Append one usage event.
pub fn record_usage(conn: &Connection, usage: &NewUsage) -> LoreResult<()> {
    conn.execute(
        "INSERT INTO lesson_usages (lesson_id, query_context, was_helpful, session_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            usage.lesson_id,
            usage.query_context,
            usage.was_helpful.map(|b| b as i32),
            usage.session_id,
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// The most-recently-created usage row for a lesson, if any.
pub fn latest_usage(conn: &Connection, lesson_id: &str) -> LoreResult<Option<LessonUsage>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, lesson_id, query_context, was_helpful, session_id, created_at
             FROM lesson_usages
             WHERE lesson_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![lesson_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<i32>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((id, lesson_id, query_context, was_helpful, session_id, created_at_str)) = result
    else {
        return Ok(None);
    };

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse created_at: {e}")))?;

    Ok(Some(LessonUsage {
        id,
        lesson_id,
        query_context,
        was_helpful: was_helpful.map(|v| v != 0),
        session_id,
        created_at,
    }))
}

/// Overwrite the feedback flag of one usage row in place.
pub fn set_usage_feedback(conn: &Connection, usage_id: i64, was_helpful: bool) -> LoreResult<()> {
    conn.execute(
        "UPDATE lesson_usages SET was_helpful = ?2 WHERE id = ?1",
        params![usage_id, was_helpful as i32],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Usage aggregates for one lesson, computed fresh.
pub fn usage_stats(conn: &Connection, lesson_id: &str) -> LoreResult<UsageStats> {
    conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(CASE WHEN was_helpful = 1 THEN 1 ELSE 0 END), 0)
         FROM lesson_usages
         WHERE lesson_id = ?1",
        params![lesson_id],
        |row| {
            Ok(UsageStats {
                usage_count: row.get::<_, i64>(0)? as u64,
                helpful_count: row.get::<_, i64>(1)? as u64,
            })
        },
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
