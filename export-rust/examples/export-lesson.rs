use dotenvy::dotenv;
use lesson_export::{DirectorySink, DocxExporter, Letterhead, PdfExporter, Session};
use lesson_sdk::{GenerationMode, GenerationRequest, LessonGenerator};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let letterhead = Letterhead::new(
        "مديرية التربية والتعليم",
        "المعلمة",
        "مدرسة الأمل الثانوية",
        "الخليل",
    );
    let generator = LessonGenerator::default();
    let mut session = Session::new();

    let request = GenerationRequest::new(
        "الأحياء",
        "الأول",
        "الانقسام الخلوي",
        GenerationMode::Worksheet,
    );
    if let Err(notice) = session.generate(&generator, &request).await {
        eprintln!("{notice}");
        return;
    }

    let mut sink = DirectorySink::new("out");
    let docx = session
        .export(&DocxExporter::new(letterhead.clone()), &mut sink)
        .unwrap();
    let pdf = session
        .export(&PdfExporter::new(letterhead), &mut sink)
        .unwrap();

    println!("{}", sink.dir().join(docx).display());
    println!("{}", sink.dir().join(pdf).display());
}
