//! Cross-crate model types that are not part of the lesson entity itself.

pub mod capabilities;
pub mod filter;
pub mod stats;

pub use capabilities::StorageCapabilities;
pub use filter::{FilterTarget, LessonFilter};
pub use stats::{CategoryStats, UsageStats};
