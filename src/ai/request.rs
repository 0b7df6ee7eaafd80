//! Per-provider request payloads and response extraction.

use serde_json::{json, Value};

use crate::ai::provider::Provider;
use crate::error::{OptimizerError, OptimizerResult};

/// What the backend is being asked to do; selects the system
/// instruction and the output budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Enhancement,
    Summarization,
}

impl TaskType {
    #[must_use]
    pub const fn system_instruction(self) -> &'static str {
        match self {
            Self::Enhancement => {
                "You are a professional content writer and editor. Your task is to enhance \
                 the given paragraph by improving its clarity, flow, and engagement while \
                 maintaining the original meaning and tone. Make the text more compelling \
                 and better structured without changing the core message."
            }
            Self::Summarization => {
                "You are a helpful assistant that creates concise, informative summaries \
                 of content. Summarize the following content in 2-3 sentences, focusing \
                 on the main points and key takeaways."
            }
        }
    }

    /// Output budget in tokens.
    #[must_use]
    pub const fn max_output_tokens(self) -> u32 {
        match self {
            Self::Enhancement => 500,
            Self::Summarization => 150,
        }
    }

    /// User-turn phrasing for chat-style providers.
    fn user_content(self, content: &str) -> String {
        match self {
            Self::Enhancement => format!(
                "Please enhance this paragraph to make it more engaging and well-written: {content}"
            ),
            Self::Summarization => content.to_owned(),
        }
    }

    /// Prompt phrasing for providers that take a single combined turn.
    fn combined_prompt(self, content: &str) -> String {
        let ask = match self {
            Self::Enhancement => format!("Please enhance this paragraph: {content}"),
            Self::Summarization => format!("Please summarize this content: {content}"),
        };
        format!("{}\n\n{ask}", self.system_instruction())
    }
}

/// Build the JSON body for one generation call.
#[must_use]
pub fn build_request(provider: Provider, model: &str, content: &str, task: TaskType) -> Value {
    match provider {
        Provider::OpenAi | Provider::Grok => json!({
            "model": model,
            "messages": [
                { "role": "system", "content": task.system_instruction() },
                { "role": "user", "content": task.user_content(content) },
            ],
            "max_tokens": task.max_output_tokens(),
            "temperature": 0.7,
        }),
        Provider::Anthropic => json!({
            "model": model,
            "max_tokens": task.max_output_tokens(),
            "messages": [
                { "role": "user", "content": task.combined_prompt(content) },
            ],
        }),
        Provider::Gemini => json!({
            "contents": [
                { "parts": [ { "text": task.combined_prompt(content) } ] }
            ],
            "generationConfig": {
                "maxOutputTokens": task.max_output_tokens(),
                "temperature": 0.7,
            },
        }),
    }
}

/// Extract the generated text from a provider response body.
///
/// A body carrying an `error` object is reported as a generation
/// failure with the provider's message; a body missing the expected
/// content path is reported as malformed.
pub fn extract_text(provider: Provider, body: &Value) -> OptimizerResult<String> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown backend error");
        return Err(OptimizerError::Generation(message.to_owned()));
    }

    let text = match provider {
        Provider::OpenAi | Provider::Grok => body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str),
        Provider::Anthropic => body.pointer("/content/0/text").and_then(Value::as_str),
        Provider::Gemini => body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str),
    };

    text.map(|t| t.trim().to_owned())
        .ok_or_else(|| OptimizerError::Generation("no content generated".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_request_shape() {
        let body = build_request(Provider::OpenAi, "gpt-5", "some text", TaskType::Enhancement);
        assert_eq!(body["model"], "gpt-5");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["max_tokens"], 500);
        assert!(body["messages"][1]["content"]
            .as_str()
            .is_some_and(|c| c.ends_with("some text")));
    }

    #[test]
    fn test_summarization_budget_smaller() {
        let body = build_request(Provider::OpenAi, "gpt-5", "text", TaskType::Summarization);
        assert_eq!(body["max_tokens"], 150);
        // Summarization sends the content as-is in the user turn.
        assert_eq!(body["messages"][1]["content"], "text");
    }

    #[test]
    fn test_anthropic_folds_instruction_into_user_turn() {
        let body = build_request(
            Provider::Anthropic,
            "claude-3-sonnet-20240229",
            "text",
            TaskType::Enhancement,
        );
        let user = body["messages"][0]["content"].as_str().unwrap_or("");
        assert!(user.contains("professional content writer"));
        assert!(user.contains("Please enhance this paragraph: text"));
    }

    #[test]
    fn test_gemini_generation_config() {
        let body = build_request(Provider::Gemini, "gemini-pro", "text", TaskType::Summarization);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 150);
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .is_some_and(|t| t.contains("Please summarize this content: text")));
    }

    #[test]
    fn test_extract_text_per_provider() {
        let openai = serde_json::json!({
            "choices": [ { "message": { "content": "  generated  " } } ]
        });
        assert_eq!(
            extract_text(Provider::OpenAi, &openai).ok(),
            Some("generated".to_owned())
        );

        let anthropic = serde_json::json!({ "content": [ { "text": "out" } ] });
        assert_eq!(
            extract_text(Provider::Anthropic, &anthropic).ok(),
            Some("out".to_owned())
        );

        let gemini = serde_json::json!({
            "candidates": [ { "content": { "parts": [ { "text": "out" } ] } } ]
        });
        assert_eq!(
            extract_text(Provider::Gemini, &gemini).ok(),
            Some("out".to_owned())
        );
    }

    #[test]
    fn test_extract_text_error_body() {
        let body = serde_json::json!({ "error": { "message": "quota exceeded" } });
        let err = extract_text(Provider::OpenAi, &body);
        assert!(matches!(
            err,
            Err(crate::error::OptimizerError::Generation(m)) if m == "quota exceeded"
        ));
    }

    #[test]
    fn test_extract_text_malformed_body() {
        let body = serde_json::json!({ "choices": [] });
        assert!(extract_text(Provider::OpenAi, &body).is_err());
    }
}
