//! # lore-ingest
//!
//! The ingestion side of the knowledge base: the genericity gate for the
//! shared pool, the keyword subcategory classifier, title/summary extraction
//! chains, the tag-overlap similarity linker, and the merge-or-create
//! pipeline that ties them together.

pub mod classifier;
pub mod extraction;
pub mod genericity;
pub mod linker;
pub mod pipeline;

pub use genericity::GenericityReport;
pub use linker::SimilarityLinker;
pub use pipeline::{IngestReport, IngestionPipeline};
