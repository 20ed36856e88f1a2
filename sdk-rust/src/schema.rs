use crate::{
    ActivityCategory, GenerationMode, JSONSchema, QuestionType, ResponseFormatJson,
    ResponseFormatOption, ToolType,
};
use serde_json::json;

const SCHEMA_NAME: &str = "lesson_artifact";

/// JSON schema of [`crate::Artifact`] sent as the structured output schema.
#[must_use]
pub fn artifact_schema() -> JSONSchema {
    let string_array = json!({ "type": "array", "items": { "type": "string" } });
    let modes: Vec<&str> = GenerationMode::ALL.iter().map(|m| m.wire_label()).collect();
    let categories: Vec<&str> = ActivityCategory::ALL.iter().map(|c| c.as_str()).collect();
    let question_types: Vec<&str> = QuestionType::ALL.iter().map(|q| q.as_str()).collect();
    let tool_types: Vec<&str> = ToolType::ALL.iter().map(|t| t.wire_label()).collect();

    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "subject": { "type": "string" },
            "semester": { "type": "string" },
            "objective": { "type": "string" },
            "mode": { "type": "string", "enum": modes },
            "toolsNeeded": string_array,
            "steps": string_array,
            "interactiveActivities": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string", "enum": categories },
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "instructions": string_array,
                    },
                    "required": ["type", "title", "description", "instructions"],
                },
            },
            "competitiveGame": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "rules": string_array,
                    "suggestedFormat": { "type": "string" },
                },
                "required": ["name", "rules", "suggestedFormat"],
            },
            "worksheetSections": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "questions": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "question": { "type": "string" },
                                    "type": { "type": "string", "enum": question_types },
                                    "options": string_array,
                                    "answer": { "type": "string" },
                                },
                                "required": ["question", "type"],
                            },
                        },
                    },
                    "required": ["title", "questions"],
                },
            },
            "electronicLinks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "platform": { "type": "string" },
                        "description": { "type": "string" },
                        "toolType": { "type": "string", "enum": tool_types },
                        "linkToObjective": { "type": "string" },
                    },
                    "required": ["platform", "description", "toolType", "linkToObjective"],
                },
            },
            "conclusion": { "type": "string" },
        },
        "required": ["title", "subject", "semester", "objective", "mode", "conclusion"],
    })
}

/// Response format that constrains the model to emit an artifact.
#[must_use]
pub fn artifact_response_format() -> ResponseFormatOption {
    ResponseFormatOption::Json(ResponseFormatJson {
        name: SCHEMA_NAME.to_string(),
        description: Some("A grade-10 worksheet or interactive activity plan.".to_string()),
        schema: Some(artifact_schema()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_required_fields() {
        let schema = artifact_schema();
        assert_eq!(
            schema["required"],
            json!(["title", "subject", "semester", "objective", "mode", "conclusion"])
        );
        assert_eq!(
            schema["properties"]["mode"]["enum"],
            json!(["ورقة عمل", "نشاط تفاعلي"])
        );
    }

    #[test]
    fn enums_match_decodable_values() {
        let schema = artifact_schema();
        let categories = &schema["properties"]["interactiveActivities"]["items"]["properties"]
            ["type"]["enum"];
        assert_eq!(
            categories,
            &json!(["practical", "group", "electronic", "competitive"])
        );
        for value in categories.as_array().unwrap() {
            serde_json::from_value::<ActivityCategory>(value.clone()).unwrap();
        }

        let tool_types =
            &schema["properties"]["electronicLinks"]["items"]["properties"]["toolType"]["enum"];
        for value in tool_types.as_array().unwrap() {
            serde_json::from_value::<ToolType>(value.clone()).unwrap();
        }
    }
}
