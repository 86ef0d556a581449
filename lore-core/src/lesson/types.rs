use serde::{Deserialize, Serialize};

/// The provenance type of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonType {
    CursorRule,
    AiGeneratedOutput,
    Manual,
    Markdown,
    ProjectDetail,
}

impl LessonType {
    /// The canonical wire/storage string for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CursorRule => "cursor-rule",
            Self::AiGeneratedOutput => "ai-generated-output",
            Self::Manual => "manual",
            Self::Markdown => "markdown",
            Self::ProjectDetail => "project-detail",
        }
    }
}

impl std::str::FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cursor-rule" => Ok(Self::CursorRule),
            "ai-generated-output" => Ok(Self::AiGeneratedOutput),
            "manual" => Ok(Self::Manual),
            "markdown" => Ok(Self::Markdown),
            "project-detail" => Ok(Self::ProjectDetail),
            other => Err(format!("unknown lesson type: {other}")),
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
