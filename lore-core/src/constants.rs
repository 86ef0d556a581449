/// Lore system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of a hex-encoded SHA-256 content hash.
pub const CONTENT_HASH_LEN: usize = 64;

/// How many leading characters of a lesson's text the classifier scans.
pub const CLASSIFIER_SCAN_WINDOW: usize = 1000;

/// How many sentences the summary fallback extracts from content.
pub const SUMMARY_SENTENCE_COUNT: usize = 2;

/// Default page size for batch jobs walking the whole lesson table.
pub const DEFAULT_SCORER_BATCH_SIZE: usize = 100;

/// Query context recorded for explicit feedback rows that had no prior usage.
pub const EXPLICIT_FEEDBACK_CONTEXT: &str = "Explicit feedback";
