//! Generation of grade-10 worksheets and classroom activities from a
//! generative model with a fixed structured output schema.

mod artifact;
mod client_utils;
mod errors;
mod generator;
pub mod google;
mod language_model;
mod opentelemetry;
mod prompt;
mod schema;
mod types;
mod types_ext;

pub use artifact::*;
pub use errors::*;
pub use generator::{
    CredentialSource, EnvCredential, GenerationRequest, GeneratorOptions, GoogleModelFactory,
    LessonGenerator, ModelFactory, StaticCredential, DEFAULT_CREDENTIAL_VAR, DEFAULT_MODEL_ID,
    MIN_CREDENTIAL_LEN,
};
pub use language_model::LanguageModel;
pub use prompt::build_prompt;
pub use schema::{artifact_response_format, artifact_schema};
pub use types::*;
