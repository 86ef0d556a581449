//! # lore-retrieval
//!
//! Query-time ranking over the stored knowledge base: AND-combined filters,
//! hybrid full-text + stored-relevance ranking with graceful degradation to
//! substring search, related-lesson attachment, and the browse/statistics
//! operations.

pub mod engine;
pub mod filter;
pub mod ranking;

pub use engine::{
    OrderedBy, RelatedLesson, SearchEngine, SearchHit, SearchRequest, SearchResponse,
};
pub use filter::resolve_filter_target;
