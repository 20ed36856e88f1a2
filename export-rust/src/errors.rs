use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A font handed to the PDF writer could not be parsed.
    #[error("Font error: {0}")]
    Font(String),
    /// Option labels run from `a` to `z`.
    #[error("A question has {0} options; at most 26 can be labelled")]
    TooManyOptions(usize),
    #[error("There is no generated lesson to export")]
    NoArtifact,
}

pub type ExportResult<T> = Result<T, ExportError>;
