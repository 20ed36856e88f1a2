//! The lesson artifact returned by the model: a worksheet or an interactive
//! activity plan.
//!
//! Field names follow the camelCase wire format of the structured output
//! schema. Optional sequences decode to empty vectors when absent, so an
//! absent field and an empty list are the same value.

use crate::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of artifact to generate and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMode {
    #[serde(rename = "ورقة عمل", alias = "worksheet", alias = "Worksheet")]
    Worksheet,
    #[serde(rename = "نشاط تفاعلي", alias = "activity", alias = "Activity")]
    Activity,
}

impl GenerationMode {
    pub const ALL: [Self; 2] = [Self::Worksheet, Self::Activity];

    /// The label sent to the model and stored in the artifact.
    #[must_use]
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::Worksheet => "ورقة عمل",
            Self::Activity => "نشاط تفاعلي",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

/// School semester of the grade-10 curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    #[serde(rename = "الأول", alias = "first")]
    First,
    #[serde(rename = "الثاني", alias = "second")]
    Second,
}

impl Semester {
    #[must_use]
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::First => "الأول",
            Self::Second => "الثاني",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Practical,
    Group,
    Electronic,
    Competitive,
}

impl ActivityCategory {
    pub const ALL: [Self; 4] = [
        Self::Practical,
        Self::Group,
        Self::Electronic,
        Self::Competitive,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Practical => "practical",
            Self::Group => "group",
            Self::Electronic => "electronic",
            Self::Competitive => "competitive",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Essay,
    Matching,
}

impl QuestionType {
    pub const ALL: [Self; 4] = [
        Self::MultipleChoice,
        Self::TrueFalse,
        Self::Essay,
        Self::Matching,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::Essay => "essay",
            Self::Matching => "matching",
        }
    }
}

/// Kind of digital resource suggested for enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolType {
    #[serde(rename = "لعبة تعليمية")]
    EducationalGame,
    #[serde(rename = "محاكاة تفاعلية")]
    InteractiveSimulation,
    #[serde(rename = "اختبار قصير")]
    ShortQuiz,
    #[serde(rename = "أداة عرض")]
    PresentationTool,
}

impl ToolType {
    pub const ALL: [Self; 4] = [
        Self::EducationalGame,
        Self::InteractiveSimulation,
        Self::ShortQuiz,
        Self::PresentationTool,
    ];

    #[must_use]
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::EducationalGame => "لعبة تعليمية",
            Self::InteractiveSimulation => "محاكاة تفاعلية",
            Self::ShortQuiz => "اختبار قصير",
            Self::PresentationTool => "أداة عرض",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveActivity {
    #[serde(rename = "type")]
    pub category: ActivityCategory,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveGame {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<String>,
    /// e.g. "Kahoot", "Classroom Competition", "Card Sort"
    pub suggested_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetSection {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectronicLink {
    pub platform: String,
    pub description: String,
    pub tool_type: ToolType,
    pub link_to_objective: String,
}

/// A generated worksheet or activity plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub title: String,
    pub subject: String,
    pub semester: String,
    pub objective: String,
    pub mode: GenerationMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_needed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactive_activities: Vec<InteractiveActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitive_game: Option<CompetitiveGame>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worksheet_sections: Vec<WorksheetSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub electronic_links: Vec<ElectronicLink>,
    pub conclusion: String,
}

/// The mode-specific part of an artifact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArtifactBody<'a> {
    Activity {
        activities: &'a [InteractiveActivity],
        game: Option<&'a CompetitiveGame>,
    },
    Worksheet {
        sections: &'a [WorksheetSection],
    },
}

impl Artifact {
    /// Decode the model's structured text and check the required fields.
    pub fn from_json(text: &str) -> GenerationResult<Self> {
        let artifact: Self = serde_json::from_str(text)
            .map_err(|error| GenerationError::MalformedResponse(error.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Required text fields must carry content; a blank title or conclusion
    /// is treated as a decoding failure.
    pub fn validate(&self) -> GenerationResult<()> {
        let required = [
            ("title", &self.title),
            ("subject", &self.subject),
            ("semester", &self.semester),
            ("objective", &self.objective),
            ("conclusion", &self.conclusion),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GenerationError::MalformedResponse(format!(
                    "required field `{field}` is empty"
                )));
            }
        }
        Ok(())
    }

    /// The body selected by `mode`. Fields belonging to the other mode are
    /// ignored.
    #[must_use]
    pub fn body(&self) -> ArtifactBody<'_> {
        match self.mode {
            GenerationMode::Activity => ArtifactBody::Activity {
                activities: &self.interactive_activities,
                game: self.competitive_game.as_ref(),
            },
            GenerationMode::Worksheet => ArtifactBody::Worksheet {
                sections: &self.worksheet_sections,
            },
        }
    }

    #[must_use]
    pub fn is_worksheet(&self) -> bool {
        self.mode == GenerationMode::Worksheet
    }
}
