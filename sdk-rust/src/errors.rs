use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanguageModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the provider failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response from the provider was unexpected. (e.g. no candidates
    /// returned in a Google completion)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type LanguageModelResult<T> = Result<T, LanguageModelError>;

/// Failure kinds of a lesson generation request.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No credential was configured, or it is too short to be real. No
    /// request was sent.
    #[error("API key is missing or invalid")]
    CredentialMissing,
    /// The model answered without any text.
    #[error("The model returned an empty response")]
    EmptyResponse,
    /// The returned text could not be decoded into a lesson artifact.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The requested model or endpoint does not exist.
    #[error("Model not found: {0}")]
    ModelNotFound(#[source] LanguageModelError),
    #[error(transparent)]
    Upstream(#[from] LanguageModelError),
}

impl GenerationError {
    /// Errors that the user resolves by configuring another key or model.
    #[must_use]
    pub fn needs_configuration(&self) -> bool {
        matches!(self, Self::CredentialMissing | Self::ModelNotFound(_))
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
