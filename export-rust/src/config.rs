use lesson_sdk::{Artifact, GenerationMode};
use serde::{Deserialize, Serialize};

/// The institution block printed at the top of every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letterhead {
    /// Largest heading of the document, e.g. the directorate name.
    pub institution: String,
    pub teacher: String,
    pub school: String,
    pub location: String,
}

impl Letterhead {
    pub fn new(
        institution: impl Into<String>,
        teacher: impl Into<String>,
        school: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            institution: institution.into(),
            teacher: teacher.into(),
            school: school.into(),
            location: location.into(),
        }
    }
}

/// Fixed wording of the exported documents.
///
/// [`Labels::arabic`] is the default. Label fields that end a line already
/// carry their trailing colon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub teacher_prefix: String,
    pub worksheet_kind: String,
    pub activity_kind: String,
    /// Kind labels used in file names.
    pub worksheet_file: String,
    pub activity_file: String,
    pub subject: String,
    pub semester: String,
    pub worksheet_objective: String,
    pub activity_objective: String,
    pub tools: String,
    pub activities: String,
    pub activity: String,
    pub game: String,
    pub game_name: String,
    pub game_format: String,
    pub worksheet_content: String,
    pub links: String,
    pub link_objective: String,
    pub closing: String,
    pub page: String,
}

impl Labels {
    #[must_use]
    pub fn arabic() -> Self {
        Self {
            teacher_prefix: "إعداد المعلمة".to_string(),
            worksheet_kind: "ورقة عمل".to_string(),
            activity_kind: "خطة نشاط صفي تفاعلي".to_string(),
            worksheet_file: "ورقة_عمل".to_string(),
            activity_file: "نشاط".to_string(),
            subject: "المبحث".to_string(),
            semester: "الفصل".to_string(),
            worksheet_objective: "الأهداف التعليمية:".to_string(),
            activity_objective: "الهدف من النشاط:".to_string(),
            tools: "الأدوات اللازمة:".to_string(),
            activities: "الأنشطة التفاعلية:".to_string(),
            activity: "نشاط".to_string(),
            game: "اللعبة التنافسية الكبرى:".to_string(),
            game_name: "اسم اللعبة".to_string(),
            game_format: "الشكل المقترح".to_string(),
            worksheet_content: "محتوى ورقة العمل:".to_string(),
            links: "الموارد الرقمية والأنشطة التفاعلية:".to_string(),
            link_objective: "الارتباط بالهدف".to_string(),
            closing: "بصمة المعلمة والخلاصة:".to_string(),
            page: "صفحة".to_string(),
        }
    }

    #[must_use]
    pub fn english() -> Self {
        Self {
            teacher_prefix: "Prepared by".to_string(),
            worksheet_kind: "Worksheet".to_string(),
            activity_kind: "Activity Plan".to_string(),
            worksheet_file: "Worksheet".to_string(),
            activity_file: "Activity".to_string(),
            subject: "Subject".to_string(),
            semester: "Semester".to_string(),
            worksheet_objective: "Learning Objectives:".to_string(),
            activity_objective: "Activity Purpose:".to_string(),
            tools: "Tools Needed:".to_string(),
            activities: "Interactive Activities:".to_string(),
            activity: "Activity".to_string(),
            game: "Competitive Game:".to_string(),
            game_name: "Game".to_string(),
            game_format: "Suggested format".to_string(),
            worksheet_content: "Worksheet Content:".to_string(),
            links: "Digital Resources:".to_string(),
            link_objective: "Link to objective".to_string(),
            closing: "Teacher's Signature & Summary:".to_string(),
            page: "Page".to_string(),
        }
    }

    #[must_use]
    pub fn kind(&self, mode: GenerationMode) -> &str {
        match mode {
            GenerationMode::Worksheet => &self.worksheet_kind,
            GenerationMode::Activity => &self.activity_kind,
        }
    }

    #[must_use]
    pub fn objective(&self, mode: GenerationMode) -> &str {
        match mode {
            GenerationMode::Worksheet => &self.worksheet_objective,
            GenerationMode::Activity => &self.activity_objective,
        }
    }

    #[must_use]
    pub fn file_kind(&self, artifact: &Artifact) -> &str {
        match artifact.mode {
            GenerationMode::Worksheet => &self.worksheet_file,
            GenerationMode::Activity => &self.activity_file,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::arabic()
    }
}
