#![allow(dead_code)]
use serde_json::{json, Value};

pub const VALID_KEY: &str = "AIzaSy-test-key-0123456789";

pub fn activity_payload() -> Value {
    json!({
        "title": "Chemical Reactions Lab",
        "subject": "Chemistry",
        "semester": "First",
        "objective": "Identify signs of a chemical reaction.",
        "mode": "نشاط تفاعلي",
        "toolsNeeded": ["Beakers", "Vinegar", "Baking soda"],
        "interactiveActivities": [{
            "type": "practical",
            "title": "Fizz test",
            "description": "Mix vinegar with baking soda and observe.",
            "instructions": ["Pour vinegar", "Add baking soda", "Record observations"],
        }],
        "competitiveGame": {
            "name": "Reaction Race",
            "rules": ["Teams of four", "One answer per turn"],
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

pub fn worksheet_payload() -> Value {
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
