use serde::{Deserialize, Serialize};

use crate::lesson::Namespace;

/// Whether a caller-supplied category string filters on the umbrella
/// category or on a derived subcategory.
///
/// One filter argument serves both lookups; the search engine resolves it
/// once with a runtime existence probe instead of scattering string
/// heuristics across call sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterTarget {
    Category(String),
    Subcategory(String),
}

impl FilterTarget {
    pub fn value(&self) -> &str {
        match self {
            Self::Category(v) | Self::Subcategory(v) => v,
        }
    }
}

/// AND-combined storage-level filters shared by search and browse queries.
#[derive(Debug, Clone)]
pub struct LessonFilter {
    /// None scans both pools (batch jobs only); search always sets one.
    pub namespace: Option<Namespace>,
    /// Exclude lessons with a non-null deprecation timestamp.
    pub active_only: bool,
    /// Category or subcategory equality filter.
    pub target: Option<FilterTarget>,
    /// Lesson matches if its tag set contains ANY of these.
    pub tags: Vec<String>,
}

impl LessonFilter {
    /// An unrestricted filter over every lesson in both pools.
    pub fn all() -> Self {
        Self {
            namespace: None,
            active_only: false,
            target: None,
            tags: Vec::new(),
        }
    }

    /// The default active-lessons view of one namespace.
    pub fn active(namespace: Namespace) -> Self {
        Self {
            namespace: Some(namespace),
            active_only: true,
            target: None,
            tags: Vec::new(),
        }
    }
}
