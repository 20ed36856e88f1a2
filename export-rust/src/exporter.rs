use crate::{sink::DownloadSink, ExportResult, Labels};
use lesson_sdk::Artifact;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Editable Word document.
    Docx,
    /// Paginated print document.
    Pdf,
}

impl DocumentFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `<kind>_<title>.<extension>`. Characters that cannot appear in a file
/// name are replaced with `_`.
#[must_use]
pub fn file_name(artifact: &Artifact, labels: &Labels, format: DocumentFormat) -> String {
    let title: String = artifact
        .title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!(
        "{}_{}.{}",
        labels.file_kind(artifact).replace(' ', "_"),
        title,
        format.extension()
    )
}

/// Renders an artifact into one document format.
pub trait Exporter {
    fn format(&self) -> DocumentFormat;

    fn labels(&self) -> &Labels;

    /// Render the document bytes. Rendering the same artifact twice yields
    /// identical bytes.
    fn render(&self, artifact: &Artifact) -> ExportResult<Vec<u8>>;

    /// Render and hand the document to `sink`. Returns the file name.
    fn export(&self, artifact: &Artifact, sink: &mut dyn DownloadSink) -> ExportResult<String> {
        let bytes = self.render(artifact)?;
        let name = file_name(artifact, self.labels(), self.format());
        tracing::debug!(file_name = %name, bytes = bytes.len(), format = %self.format(), "document exported");
        sink.deliver(&name, self.format().mime_type(), bytes)?;
        Ok(name)
    }
}
