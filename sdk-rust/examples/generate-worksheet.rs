use dotenvy::dotenv;
use lesson_sdk::{GenerationMode, LessonGenerator};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Reads the key from API_KEY on every call.
    let generator = LessonGenerator::default();

    let artifact = generator
        .generate("الفيزياء", "الأول", "الحركة في خط مستقيم", GenerationMode::Worksheet)
        .await
        .unwrap();

    println!(
        "{}",
        serde_json::to_string_pretty(&artifact).expect("Failed to format JSON")
    );
}
