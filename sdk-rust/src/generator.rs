use crate::{
    google::{GoogleModel, GoogleModelOptions},
    prompt::build_prompt,
    schema::artifact_response_format,
    Artifact, GenerationError, GenerationMode, GenerationResult, LanguageModel,
    LanguageModelError, LanguageModelInput, Message, Part,
};
use std::{collections::HashMap, env, sync::Arc};

/// Credentials shorter than this are treated as unset.
pub const MIN_CREDENTIAL_LEN: usize = 10;

pub const DEFAULT_MODEL_ID: &str = "gemini-3-flash-preview";
pub const DEFAULT_CREDENTIAL_VAR: &str = "API_KEY";

/// Where the API key comes from. Read on every request, so a rotated key
/// applies to the next call.
pub trait CredentialSource: Send + Sync {
    fn credential(&self) -> Option<String>;
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_VAR)
    }
}

impl CredentialSource for EnvCredential {
    fn credential(&self) -> Option<String> {
        env::var(&self.var).ok()
    }
}

#[derive(Debug, Clone)]
pub struct StaticCredential(pub String);

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Builds the model for one request once a credential has been accepted.
pub trait ModelFactory: Send + Sync {
    fn build(&self, api_key: String) -> Arc<dyn LanguageModel>;
}

pub struct GoogleModelFactory {
    model_id: String,
    base_url: Option<String>,
    headers: Option<HashMap<String, String>>,
    client: reqwest::Client,
}

impl GoogleModelFactory {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            base_url: None,
            headers: None,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }
}

impl ModelFactory for GoogleModelFactory {
    fn build(&self, api_key: String) -> Arc<dyn LanguageModel> {
        Arc::new(GoogleModel::new(
            self.model_id.clone(),
            GoogleModelOptions {
                api_key,
                base_url: self.base_url.clone(),
                headers: self.headers.clone(),
                client: Some(self.client.clone()),
            },
        ))
    }
}

/// Options for [`LessonGenerator`].
/// # Default Values
/// - `model_id`: `gemini-3-flash-preview`
/// - `credential_var`: `API_KEY`
/// - `base_url`: `None` (Google public endpoint)
/// - `headers`: `None`
/// - `temperature`: `None`
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub model_id: String,
    /// Environment variable holding the API key.
    pub credential_var: String,
    pub base_url: Option<String>,
    /// Extra headers sent with every request.
    pub headers: Option<HashMap<String, String>>,
    /// Amount of randomness injected into the response. Ranges from 0.0 to 1.0
    pub temperature: Option<f64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            credential_var: DEFAULT_CREDENTIAL_VAR.to_string(),
            base_url: None,
            headers: None,
            temperature: None,
        }
    }
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub subject: String,
    pub semester: String,
    pub topic: String,
    pub mode: GenerationMode,
}

impl GenerationRequest {
    pub fn new(
        subject: impl Into<String>,
        semester: impl Into<String>,
        topic: impl Into<String>,
        mode: GenerationMode,
    ) -> Self {
        Self {
            subject: subject.into(),
            semester: semester.into(),
            topic: topic.into(),
            mode,
        }
    }
}

/// Turns a subject, semester, topic and mode into a lesson [`Artifact`]
/// with one model round trip.
pub struct LessonGenerator {
    credentials: Box<dyn CredentialSource>,
    models: Box<dyn ModelFactory>,
    temperature: Option<f64>,
}

impl LessonGenerator {
    #[must_use]
    pub fn new(options: GeneratorOptions) -> Self {
        let GeneratorOptions {
            model_id,
            credential_var,
            base_url,
            headers,
            temperature,
        } = options;

        let mut models = GoogleModelFactory::new(model_id);
        models.base_url = base_url;
        models.headers = headers;

        Self {
            credentials: Box::new(EnvCredential::new(credential_var)),
            models: Box::new(models),
            temperature,
        }
    }

    /// Use custom credential and model sources.
    pub fn with_sources(
        credentials: impl CredentialSource + 'static,
        models: impl ModelFactory + 'static,
    ) -> Self {
        Self {
            credentials: Box::new(credentials),
            models: Box::new(models),
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Generate one artifact. Inputs are not re-validated; blank subjects or
    /// topics only make the completion less grounded.
    pub async fn generate(
        &self,
        subject: &str,
        semester: &str,
        topic: &str,
        mode: GenerationMode,
    ) -> GenerationResult<Artifact> {
        let api_key = self
            .credentials
            .credential()
            .filter(|key| key.chars().count() >= MIN_CREDENTIAL_LEN)
            .ok_or(GenerationError::CredentialMissing)?;

        let model = self.models.build(api_key);

        let input = LanguageModelInput {
            messages: vec![Message::user(vec![Part::text(build_prompt(
                subject, semester, topic, mode,
            ))])],
            response_format: Some(artifact_response_format()),
            temperature: self.temperature,
            ..Default::default()
        };

        let response = model.generate(input).await.map_err(|error| {
            tracing::error!(
                provider = model.provider(),
                model = %model.model_id(),
                %error,
                "lesson generation failed"
            );
            classify_model_error(error)
        })?;

        let text = response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        let artifact = Artifact::from_json(text)?;
        if artifact.mode != mode {
            return Err(GenerationError::MalformedResponse(format!(
                "requested mode `{mode}` but the model returned `{}`",
                artifact.mode
            )));
        }

        tracing::debug!(title = %artifact.title, %mode, "lesson artifact generated");
        Ok(artifact)
    }

    pub async fn generate_request(&self, request: &GenerationRequest) -> GenerationResult<Artifact> {
        self.generate(
            &request.subject,
            &request.semester,
            &request.topic,
            request.mode,
        )
        .await
    }
}

impl Default for LessonGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

/// A missing model surfaces either as a 404 status or as a "not found"
/// message from the endpoint.
fn classify_model_error(error: LanguageModelError) -> GenerationError {
    let not_found = match &error {
        LanguageModelError::StatusCode(status, _) if *status == reqwest::StatusCode::NOT_FOUND => {
            true
        }
        other => {
            let message = other.to_string().to_lowercase();
            message.contains("404") || message.contains("not found")
        }
    };

    if not_found {
        GenerationError::ModelNotFound(error)
    } else {
        GenerationError::Upstream(error)
    }
}
