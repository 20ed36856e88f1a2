use crate::{DownloadSink, ExportError, ExportResult, Exporter};
use lesson_sdk::{Artifact, GenerationRequest, LessonGenerator};
use std::sync::Arc;
use thiserror::Error;

/// What the user is told when a generation request does not produce an
/// artifact. The messages are shown as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Subject or topic was left blank. Nothing was sent.
    #[error("يرجى ملء الخيارات أولاً.")]
    MissingInput,
    /// The credential or the model has to be configured first.
    #[error("⚠️ تنبيه تقني: الخدمة غير مرتبطة بمفتاح API صحيح. يرجى ضبط المفتاح ثم المحاولة مجدداً.")]
    NeedsConfiguration,
    #[error("عذراً، حدث خطأ: {0}")]
    Failed(String),
}

/// Holds the artifact most recently generated in one user session.
///
/// A new request replaces the slot. The slot is emptied as soon as a
/// request starts, so a failed request never leaves an older artifact
/// behind to be exported by mistake.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Arc<Artifact>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn generate(
        &mut self,
        generator: &LessonGenerator,
        request: &GenerationRequest,
    ) -> Result<Arc<Artifact>, Notice> {
        if request.subject.trim().is_empty() || request.topic.trim().is_empty() {
            return Err(Notice::MissingInput);
        }

        self.current = None;

        match generator.generate_request(request).await {
            Ok(artifact) => {
                let artifact = Arc::new(artifact);
                self.current = Some(Arc::clone(&artifact));
                Ok(artifact)
            }
            Err(error) if error.needs_configuration() => {
                tracing::warn!(%error, "lesson generation needs configuration");
                Err(Notice::NeedsConfiguration)
            }
            Err(error) => {
                tracing::warn!(%error, "lesson generation failed");
                Err(Notice::Failed(error.to_string()))
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Arc<Artifact>> {
        self.current.as_ref()
    }

    /// Export the current artifact. Returns the delivered file name.
    pub fn export(
        &self,
        exporter: &dyn Exporter,
        sink: &mut dyn DownloadSink,
    ) -> ExportResult<String> {
        let artifact = self.current.as_deref().ok_or(ExportError::NoArtifact)?;
        exporter.export(artifact, sink)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
