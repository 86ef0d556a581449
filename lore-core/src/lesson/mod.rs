//! The lesson domain model: the central entity, its namespaces, relationship
//! edges, usage events, and the raw ingestion input.

pub mod base;
pub mod namespace;
pub mod raw;
pub mod relationships;
pub mod types;
pub mod usage;

pub use base::Lesson;
pub use namespace::Namespace;
pub use raw::RawLesson;
pub use relationships::{LessonRelationship, RelationshipType};
pub use types::LessonType;
pub use usage::{LessonUsage, NewUsage};
