//! StorageEngine — owns the ConnectionPool, implements ILessonStorage,
//! startup migrations, and capability probing.

use std::path::Path;

use chrono::{DateTime, Utc};

use lore_core::errors::LoreResult;
use lore_core::lesson::{
    Lesson, LessonRelationship, LessonUsage, Namespace, NewUsage, RelationshipType,
};
use lore_core::models::{CategoryStats, LessonFilter, StorageCapabilities, UsageStats};
use lore_core::traits::ILessonStorage;

use crate::capabilities;
use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the full
/// ILessonStorage interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
    caps: StorageCapabilities,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> LoreResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        Self::finish_open(pool, true)
    }

    /// Open an in-memory storage engine (for testing).
    /// Routes all reads through the writer since in-memory read pool
    /// connections are isolated databases that can't see the writer's changes.
    pub fn open_in_memory() -> LoreResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        Self::finish_open(pool, false)
    }

    fn finish_open(pool: ConnectionPool, use_read_pool: bool) -> LoreResult<Self> {
        let caps = pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            if use_read_pool && !crate::pool::pragmas::verify_wal_mode(conn)? {
                tracing::warn!("WAL mode not active; reads may contend with the writer");
            }
            capabilities::probe(conn)
        })?;
        Ok(Self {
            pool,
            use_read_pool,
            caps,
        })
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> LoreResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LoreResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl ILessonStorage for StorageEngine {
    fn create(&self, lesson: &Lesson) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::lesson_crud::insert_lesson(conn, lesson))
    }

    fn get(&self, id: &str) -> LoreResult<Option<Lesson>> {
        self.with_reader(|conn| crate::queries::lesson_crud::get_lesson(conn, id))
    }

    fn update(&self, lesson: &Lesson) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::lesson_crud::update_lesson(conn, lesson))
    }

    fn delete(&self, id: &str) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::lesson_crud::delete_lesson(conn, id))
    }

    fn find_by_hash(
        &self,
        content_hash: &str,
        namespace: &Namespace,
    ) -> LoreResult<Option<Lesson>> {
        self.with_reader(|conn| {
            crate::queries::lesson_query::find_by_hash(conn, content_hash, namespace)
        })
    }

    fn query(&self, filter: &LessonFilter) -> LoreResult<Vec<Lesson>> {
        self.with_reader(|conn| crate::queries::lesson_query::query(conn, filter))
    }

    fn query_generic_by_category(&self, category: &str) -> LoreResult<Vec<Lesson>> {
        self.with_reader(|conn| {
            crate::queries::lesson_query::query_generic_by_category(conn, category)
        })
    }

    fn subcategory_exists(&self, subcategory: &str) -> LoreResult<bool> {
        self.with_reader(|conn| crate::queries::lesson_query::subcategory_exists(conn, subcategory))
    }

    fn list_page(&self, offset: u64, limit: u64) -> LoreResult<Vec<Lesson>> {
        self.with_reader(|conn| crate::queries::lesson_query::list_page(conn, offset, limit))
    }

    fn count(&self) -> LoreResult<u64> {
        self.with_reader(crate::queries::lesson_query::count)
    }

    fn search_fulltext(
        &self,
        query: &str,
        filter: &LessonFilter,
        limit: usize,
    ) -> LoreResult<Vec<(Lesson, f64)>> {
        if !self.caps.fulltext {
            return Ok(Vec::new());
        }
        self.with_reader(|conn| {
            crate::queries::lesson_search::search_fulltext(conn, query, filter, limit)
        })
    }

    fn search_substring(
        &self,
        query: &str,
        filter: &LessonFilter,
        limit: usize,
    ) -> LoreResult<Vec<Lesson>> {
        self.with_reader(|conn| {
            crate::queries::lesson_search::search_substring(conn, query, filter, limit)
        })
    }

    fn add_relationship(&self, edge: &LessonRelationship) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::relationship_ops::add_relationship(conn, edge))
    }

    fn get_relationships(
        &self,
        lesson_id: &str,
        rel_type: Option<RelationshipType>,
    ) -> LoreResult<Vec<LessonRelationship>> {
        self.with_reader(|conn| {
            crate::queries::relationship_ops::get_relationships(conn, lesson_id, rel_type)
        })
    }

    fn has_relationship(
        &self,
        lesson_id: &str,
        related_lesson_id: &str,
        rel_type: RelationshipType,
    ) -> LoreResult<bool> {
        self.with_reader(|conn| {
            crate::queries::relationship_ops::has_relationship(
                conn,
                lesson_id,
                related_lesson_id,
                rel_type,
            )
        })
    }

    fn record_usage(&self, usage: &NewUsage) -> LoreResult<()> {
        if !self.caps.usage_tracking {
            return Ok(());
        }
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::usage_ops::record_usage(conn, usage))
    }

    fn latest_usage(&self, lesson_id: &str) -> LoreResult<Option<LessonUsage>> {
        if !self.caps.usage_tracking {
            return Ok(None);
        }
        self.with_reader(|conn| crate::queries::usage_ops::latest_usage(conn, lesson_id))
    }

    fn set_usage_feedback(&self, usage_id: i64, was_helpful: bool) -> LoreResult<()> {
        if !self.caps.usage_tracking {
            return Ok(());
        }
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::usage_ops::set_usage_feedback(conn, usage_id, was_helpful)
        })
    }

    fn usage_stats(&self, lesson_id: &str) -> LoreResult<UsageStats> {
        if !self.caps.usage_tracking {
            return Ok(UsageStats::default());
        }
        self.with_reader(|conn| crate::queries::usage_ops::usage_stats(conn, lesson_id))
    }

    fn set_relevance_score(&self, lesson_id: &str, score: f64) -> LoreResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::lifecycle::set_relevance_score(conn, lesson_id, score)
        })
    }

    fn deprecate(&self, lesson_id: &str, when: DateTime<Utc>) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::lifecycle::deprecate(conn, lesson_id, when))
    }

    fn restore(&self, lesson_id: &str) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::lifecycle::restore(conn, lesson_id))
    }

    fn supersede(&self, old_id: &str, new_id: &str) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::lifecycle::supersede(conn, old_id, new_id))
    }

    fn category_statistics(&self) -> LoreResult<Vec<CategoryStats>> {
        self.with_reader(crate::queries::aggregation::category_statistics)
    }

    fn capabilities(&self) -> StorageCapabilities {
        self.caps
    }

    fn vacuum(&self) -> LoreResult<()> {
        self.pool
            .writer
            .with_conn_sync(crate::queries::maintenance::full_vacuum)
    }
}
