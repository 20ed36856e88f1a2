use crate::{AssistantMessage, Message, ModelResponse, Part, ReasoningPart, TextPart, UserMessage};

impl TextPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for TextPart {
    fn from(value: &str) -> Self {
        Self {
            text: value.to_string(),
        }
    }
}

impl From<String> for TextPart {
    fn from(value: String) -> Self {
        Self { text: value }
    }
}

impl ReasoningPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            signature: None,
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart::new(text))
    }

    pub fn reasoning(text: impl Into<String>) -> Self {
        Self::Reasoning(ReasoningPart::new(text))
    }
}

impl From<TextPart> for Part {
    fn from(value: TextPart) -> Self {
        Self::Text(value)
    }
}

impl From<ReasoningPart> for Part {
    fn from(value: ReasoningPart) -> Self {
        Self::Reasoning(value)
    }
}

impl Message {
    pub fn user(content: Vec<Part>) -> Self {
        Self::User(UserMessage { content })
    }

    pub fn assistant(content: Vec<Part>) -> Self {
        Self::Assistant(AssistantMessage { content })
    }
}

impl ModelResponse {
    /// The first text part of the response, skipping reasoning.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|part| match part {
            Part::Text(text_part) => Some(text_part.text.as_str()),
            Part::Reasoning(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_skips_reasoning_parts() {
        let response = ModelResponse {
            content: vec![Part::reasoning("thinking"), Part::text("{}")],
            usage: None,
        };
        assert_eq!(response.text(), Some("{}"));
    }

    #[test]
    fn text_is_none_without_text_parts() {
        let response = ModelResponse {
            content: vec![Part::reasoning("thinking")],
            usage: None,
        };
        assert_eq!(response.text(), None);
    }
}
