use crate::ExportResult;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Receives a finished document. The sink owns the buffer; the exporter
/// keeps no copy.
pub trait DownloadSink {
    fn deliver(&mut self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> ExportResult<()>;
}

/// Writes documents into a directory, replacing files with the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, _mime_type: &str, bytes: Vec<u8>) -> ExportResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "document saved");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Keeps delivered documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<DeliveredFile>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DeliveredFile> {
        self.files.last()
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> ExportResult<()> {
        self.files.push(DeliveredFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        });
        Ok(())
    }
}
