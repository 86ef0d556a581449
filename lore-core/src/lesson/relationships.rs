use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typed edge kinds between lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Prerequisite,
    Related,
    Alternative,
    Supersedes,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prerequisite => "prerequisite",
            Self::Related => "related",
            Self::Alternative => "alternative",
            Self::Supersedes => "supersedes",
        }
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prerequisite" => Ok(Self::Prerequisite),
            "related" => Ok(Self::Related),
            "alternative" => Ok(Self::Alternative),
            "supersedes" => Ok(Self::Supersedes),
            other => Err(format!("unknown relationship type: {other}")),
        }
    }
}

/// A directed, typed, scored edge between two lessons.
///
/// The (lesson_id, related_lesson_id, relationship_type) triple is unique.
/// Edges are created only by the similarity linker at lesson-creation time,
/// never updated, and cascade-deleted with either endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRelationship {
    pub lesson_id: String,
    pub related_lesson_id: String,
    pub relationship_type: RelationshipType,
    /// The similarity strength that produced the edge.
    pub relevance_score: f64,
    pub created_at: DateTime<Utc>,
}
