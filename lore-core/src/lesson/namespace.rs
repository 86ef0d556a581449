use serde::{Deserialize, Serialize};

/// The two disjoint lesson pools.
///
/// Generic lessons are deduplicated globally by content hash and are
/// reusable across all source projects. Project-detail lessons are
/// deduplicated per (content hash, source project), so identical content in
/// two projects stays as two distinct lessons.
///
/// Project-detail operations carry the trusted project identifier explicitly;
/// there is no ambient "current project" state anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "project", rename_all = "snake_case")]
pub enum Namespace {
    Generic,
    ProjectDetail(String),
}

impl Namespace {
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic)
    }

    /// The scoping project for project-detail namespaces.
    pub fn project(&self) -> Option<&str> {
        match self {
            Self::Generic => None,
            Self::ProjectDetail(p) => Some(p),
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => f.write_str("generic"),
            Self::ProjectDetail(p) => write!(f, "project-detail:{p}"),
        }
    }
}
