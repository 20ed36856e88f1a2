mod common;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use common::{activity_payload, VALID_KEY};
use lesson_sdk::{
    google::{GoogleModel, GoogleModelOptions},
    GenerationError, GenerationMode, LanguageModel, LanguageModelError, LanguageModelInput,
    LessonGenerator, Message, Part, StaticCredential,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    env,
    sync::{Arc, Mutex},
};

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

struct RecordedRequest {
    model_action: String,
    query: HashMap<String, String>,
    api_key: Option<String>,
    body: Value,
}

/// Serves `models/{model}:generateContent`. Any model other than
/// `gemini-test` answers 404 like the real endpoint.
async fn generate_content(
    State(recorded): State<Recorded>,
    Path(model_action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    recorded.requests.lock().unwrap().push(RecordedRequest {
        model_action: model_action.clone(),
        query,
        api_key,
        body,
    });

    if model_action != "gemini-test:generateContent" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": { "code": 404, "message": "model is not found", "status": "NOT_FOUND" }
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "planning", "thought": true },
                        { "text": activity_payload().to_string() },
                    ],
                },
                "finishReason": "STOP",
                "index": 0,
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 480 },
        })),
    )
}

async fn serve(recorded: Recorded) -> String {
    let app = Router::new()
        .route("/v1beta/models/{model_action}", post(generate_content))
        .with_state(recorded);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

fn model(base_url: &str, model_id: &str) -> GoogleModel {
    GoogleModel::new(
        model_id,
        GoogleModelOptions {
            api_key: VALID_KEY.to_string(),
            base_url: Some(format!("{base_url}/")),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn google_model_posts_generate_content() {
    let recorded = Recorded::default();
    let base_url = serve(recorded.clone()).await;

    let response = model(&base_url, "gemini-test")
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("hello")])],
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.content.len(), 2);
    assert!(matches!(response.content[0], Part::Reasoning(_)));
    assert_eq!(response.usage.as_ref().unwrap().input_tokens, 120);
    assert_eq!(response.usage.as_ref().unwrap().output_tokens, 480);

    let requests = recorded.requests.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.model_action, "gemini-test:generateContent");
    assert_eq!(request.api_key.as_deref(), Some(VALID_KEY));
    assert!(request.query.is_empty());
    assert_eq!(request.body["contents"][0]["parts"][0]["text"], "hello");
}

#[tokio::test]
async fn google_model_surfaces_status_errors() {
    let base_url = serve(Recorded::default()).await;

    let error = model(&base_url, "gemini-missing")
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text("hello")])],
            ..Default::default()
        })
        .await
        .unwrap_err();

    match error {
        LanguageModelError::StatusCode(status, body) => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            assert!(body.contains("NOT_FOUND"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn generator_round_trip_through_google_endpoint() {
    let recorded = Recorded::default();
    let base_url = serve(recorded.clone()).await;

    let generator = LessonGenerator::new(lesson_sdk::GeneratorOptions {
        model_id: "gemini-test".to_string(),
        credential_var: "LESSON_SDK_TEST_UNUSED_KEY".to_string(),
        base_url: Some(base_url.clone()),
        ..Default::default()
    });
    // The env var is unset, so nothing reaches the server.
    let error = generator
        .generate("Chemistry", "First", "Chemical Reactions", GenerationMode::Activity)
        .await
        .unwrap_err();
    assert!(matches!(error, GenerationError::CredentialMissing));
    assert!(recorded.requests.lock().unwrap().is_empty());

    let factory = lesson_sdk::GoogleModelFactory::new("gemini-test").with_base_url(base_url);
    let generator = LessonGenerator::with_sources(StaticCredential(VALID_KEY.to_string()), factory);
    let artifact = generator
        .generate("Chemistry", "First", "Chemical Reactions", GenerationMode::Activity)
        .await
        .unwrap();
    assert_eq!(artifact.competitive_game.unwrap().suggested_format, "Kahoot");

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let config = &requests[0].body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(
        config["responseJsonSchema"]["required"],
        json!(["title", "subject", "semester", "objective", "mode", "conclusion"])
    );
}

#[tokio::test]
async fn unknown_model_maps_to_model_not_found() {
    let base_url = serve(Recorded::default()).await;
    let factory = lesson_sdk::GoogleModelFactory::new("gemini-missing").with_base_url(base_url);
    let generator = LessonGenerator::with_sources(StaticCredential(VALID_KEY.to_string()), factory);

    let error = generator
        .generate("Chemistry", "First", "Acids", GenerationMode::Worksheet)
        .await
        .unwrap_err();

    assert!(matches!(error, GenerationError::ModelNotFound(_)));
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_api_key() {
    const SECRET: &str = "SECRET-KEY-0123456789";
    // Bind and release a port so the connection is refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let factory =
        lesson_sdk::GoogleModelFactory::new("gemini-x").with_base_url(format!("http://{addr}"));
    let generator = LessonGenerator::with_sources(StaticCredential(SECRET.to_string()), factory);

    let error = generator
        .generate("Chemistry", "First", "Acids", GenerationMode::Worksheet)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        GenerationError::Upstream(LanguageModelError::Transport(_))
    ));
    assert!(!error.to_string().contains(SECRET));
    assert!(!format!("{error:?}").contains(SECRET));
}

#[tokio::test]
#[ignore = "calls the live Google endpoint; needs GOOGLE_API_KEY"]
async fn live_google_generates_worksheet() {
    dotenvy::dotenv().ok();
    let key = env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY must be set");
    let generator = LessonGenerator::with_sources(
        StaticCredential(key),
        lesson_sdk::GoogleModelFactory::new("gemini-2.5-flash"),
    );

    let artifact = generator
        .generate("الفيزياء", "الأول", "الحركة", GenerationMode::Worksheet)
        .await
        .unwrap();

    assert_eq!(artifact.mode, GenerationMode::Worksheet);
    assert!(!artifact.title.trim().is_empty());
}
