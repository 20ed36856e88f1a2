#![allow(dead_code)]
use lesson_export::Letterhead;
use lesson_sdk::Artifact;
use serde_json::{json, Value};

pub const VALID_KEY: &str = "AIzaSy-test-key-0123456789";

pub fn letterhead() -> Letterhead {
    Letterhead::new(
        "Directorate of Education",
        "A. Teacher",
        "Al-Amal School",
        "Hebron",
    )
}

pub fn activity_json() -> Value {
    json!({
        "title": "Chemical Reactions Lab",
        "subject": "Chemistry",
        "semester": "First",
        "objective": "Identify signs of a chemical reaction.",
        "mode": "نشاط تفاعلي",
        "toolsNeeded": ["Beakers", "Vinegar"],
        "interactiveActivities": [{
            "type": "practical",
            "title": "Fizz test",
            "description": "Mix vinegar with baking soda and observe.",
            "instructions": ["Pour vinegar", "Add baking soda"],
        }],
        "competitiveGame": {
            "name": "Reaction Race",
            "rules": ["Teams of four"],
            "suggestedFormat": "Kahoot",
        },
        "electronicLinks": [{
            "platform": "PhET",
            "description": "Balancing equations simulation.",
            "toolType": "محاكاة تفاعلية",
            "linkToObjective": "Visualises conservation of mass.",
        }],
        "conclusion": "Reactions rearrange atoms.",
    })
}

pub fn worksheet_json() -> Value {
    json!({
        "title": "Motion Worksheet",
        "subject": "Physics",
        "semester": "Second",
        "objective": "Describe uniform motion.",
        "mode": "ورقة عمل",
        "worksheetSections": [{
            "title": "Part A",
            "questions": [
                { "question": "Unit of speed?", "type": "multiple_choice", "options": ["m/s", "kg", "N"] },
                { "question": "Explain inertia.", "type": "essay" },
            ],
        }],
        "conclusion": "Speed is distance over time.",
    })
}

pub fn artifact(value: &Value) -> Artifact {
    Artifact::from_json(&value.to_string()).unwrap()
}

/// A worksheet with one section of `count` true/false questions.
pub fn long_worksheet(count: usize) -> Artifact {
    let questions: Vec<Value> = (1..=count)
        .map(|n| json!({ "question": format!("Statement number {n} is true."), "type": "true_false" }))
        .collect();
    let mut value = worksheet_json();
    value["worksheetSections"] = json!([{ "title": "Part B", "questions": questions }]);
    artifact(&value)
}
