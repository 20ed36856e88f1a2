mod common;

use common::{activity_json, letterhead, worksheet_json, VALID_KEY};
use lesson_export::{
    DirectorySink, DocxExporter, ExportError, Labels, MemorySink, Notice, PdfExporter, Session,
};
use lesson_sdk::{
    lesson_sdk_test::{MockGenerateResult, MockLanguageModel, MockModelFactory},
    GenerationMode, GenerationRequest, LanguageModelError, LessonGenerator, StaticCredential,
};
use std::sync::Arc;

fn generator(key: &str) -> (LessonGenerator, Arc<MockLanguageModel>) {
    let model = Arc::new(MockLanguageModel::new());
    let generator = LessonGenerator::with_sources(
        StaticCredential(key.to_string()),
        MockModelFactory::new(model.clone()),
    );
    (generator, model)
}

fn activity_request() -> GenerationRequest {
    GenerationRequest::new("Chemistry", "First", "Chemical Reactions", GenerationMode::Activity)
}

fn worksheet_request() -> GenerationRequest {
    GenerationRequest::new("Physics", "Second", "Motion", GenerationMode::Worksheet)
}

#[tokio::test]
async fn blank_topic_is_rejected_before_generation() {
    let (generator, model) = generator(VALID_KEY);
    let mut session = Session::new();

    let request = GenerationRequest::new("Chemistry", "First", "   ", GenerationMode::Activity);
    let notice = session.generate(&generator, &request).await.unwrap_err();

    assert_eq!(notice, Notice::MissingInput);
    assert_eq!(notice.to_string(), "يرجى ملء الخيارات أولاً.");
    assert!(model.tracked_generate_inputs().is_empty());
}

#[tokio::test]
async fn generated_activity_exports_in_both_formats() {
    let (generator, model) = generator(VALID_KEY);
    model.enqueue_generate(MockGenerateResult::text(activity_json().to_string()));
    let mut session = Session::new();

    let artifact = session.generate(&generator, &activity_request()).await.unwrap();
    assert_eq!(artifact.title, "Chemical Reactions Lab");
    assert!(session.current().is_some());

    let mut sink = MemorySink::new();
    let docx = DocxExporter::new(letterhead()).with_labels(Labels::english());
    let pdf = PdfExporter::new(letterhead()).with_labels(Labels::english());
    assert_eq!(
        session.export(&docx, &mut sink).unwrap(),
        "Activity_Chemical Reactions Lab.docx"
    );
    assert_eq!(
        session.export(&pdf, &mut sink).unwrap(),
        "Activity_Chemical Reactions Lab.pdf"
    );
    assert_eq!(sink.files.len(), 2);
}

#[tokio::test]
async fn failed_request_clears_previous_artifact() {
    let (generator, model) = generator(VALID_KEY);
    model.enqueue_generate(MockGenerateResult::text(worksheet_json().to_string()));
    model.enqueue_generate(MockGenerateResult::error(LanguageModelError::StatusCode(
        reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        "backend unavailable".to_string(),
    )));
    let mut session = Session::new();

    session.generate(&generator, &worksheet_request()).await.unwrap();
    assert!(session.current().is_some());

    let notice = session.generate(&generator, &worksheet_request()).await.unwrap_err();
    let Notice::Failed(message) = &notice else {
        panic!("unexpected notice: {notice:?}");
    };
    assert!(message.contains("backend unavailable"));
    assert!(notice.to_string().starts_with("عذراً، حدث خطأ: "));

    assert!(session.current().is_none());
    let error = session
        .export(&DocxExporter::new(letterhead()), &mut MemorySink::new())
        .unwrap_err();
    assert!(matches!(error, ExportError::NoArtifact));
}

#[tokio::test]
async fn short_credential_needs_configuration() {
    let (generator, model) = generator("short");
    let mut session = Session::new();

    let notice = session.generate(&generator, &activity_request()).await.unwrap_err();
    assert_eq!(notice, Notice::NeedsConfiguration);
    assert!(model.tracked_generate_inputs().is_empty());
}

#[tokio::test]
async fn missing_model_needs_configuration() {
    let (generator, model) = generator(VALID_KEY);
    model.enqueue_generate(MockGenerateResult::error(LanguageModelError::StatusCode(
        reqwest::StatusCode::NOT_FOUND,
        "models/gemini-x is not found".to_string(),
    )));
    let mut session = Session::new();

    let notice = session.generate(&generator, &activity_request()).await.unwrap_err();
    assert_eq!(notice, Notice::NeedsConfiguration);
}

#[tokio::test]
async fn directory_sink_writes_the_document() {
    let (generator, model) = generator(VALID_KEY);
    model.enqueue_generate(MockGenerateResult::text(worksheet_json().to_string()));
    let mut session = Session::new();
    session.generate(&generator, &worksheet_request()).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path().join("downloads"));
    let name = session
        .export(&PdfExporter::new(letterhead()), &mut sink)
        .unwrap();

    assert_eq!(name, "ورقة_عمل_Motion Worksheet.pdf");
    let bytes = std::fs::read(sink.dir().join(&name)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn clear_ends_the_session() {
    let (generator, model) = generator(VALID_KEY);
    model.enqueue_generate(MockGenerateResult::text(activity_json().to_string()));
    let mut session = Session::new();
    session.generate(&generator, &activity_request()).await.unwrap();

    session.clear();
    assert!(session.current().is_none());
}
