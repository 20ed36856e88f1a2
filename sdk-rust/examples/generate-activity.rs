use dotenvy::dotenv;
use lesson_sdk::{ArtifactBody, GenerationMode, GeneratorOptions, LessonGenerator};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let generator = LessonGenerator::new(GeneratorOptions {
        model_id: std::env::var("LESSON_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
        temperature: Some(0.7),
        ..Default::default()
    });

    let artifact = generator
        .generate("الكيمياء", "الثاني", "سرعة التفاعل الكيميائي", GenerationMode::Activity)
        .await
        .unwrap();

    println!("{}\n{}\n", artifact.title, artifact.objective);

    if let ArtifactBody::Activity { activities, game } = artifact.body() {
        for activity in activities {
            println!("[{}] {}", activity.category, activity.title);
            for instruction in &activity.instructions {
                println!("  - {instruction}");
            }
        }
        if let Some(game) = game {
            println!("\n{} ({})", game.name, game.suggested_format);
        }
    }
}
