//! SQL query modules, one per concern.

pub mod aggregation;
pub mod filter_sql;
pub mod lesson_crud;
pub mod lesson_query;
pub mod lesson_search;
pub mod lifecycle;
pub mod maintenance;
pub mod relationship_ops;
pub mod usage_ops;
