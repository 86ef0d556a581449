//! # lore-core
//!
//! Foundation crate for the Lore knowledge base.
//! Defines all types, traits, errors, config, constants, and content hashing.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod hash;
pub mod lesson;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LoreConfig;
pub use errors::{LoreError, LoreResult};
pub use lesson::{Lesson, LessonType, Namespace, RawLesson, RelationshipType};
