//! AI chat backend abstraction.
//!
//! The gateway forwards coaching questions, prefixed with a fixed system
//! prompt and any game-data context, to a generative model. The backend
//! sits behind a trait so tests can swap in a mock; the only production
//! implementation talks to the Gemini REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors from the AI backend.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI response unparseable: {0}")]
    ResponseParseError(String),

    #[error("AI response took longer than {0} seconds")]
    Timeout(u64),
}

/// A message in a conversation with the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// System prompt giving the assistant its coaching persona.
pub const SYSTEM_PROMPT: &str = "\
You are a League of Legends Assistant, a knowledgeable and friendly AI companion to coach players and answer questions.

Your personality:
- You're passionate about League of Legends and love discussing strategy, champions, and gameplay. Casual, encouraging, and sometimes playful that uses
 terminology naturally (e.g., \"inting\", \"fed\", \"gank\", \"peel\", \"kiting\")

Your role:
- Answer questions about player stats, match history, and champion data
- Provide insights and analysis based on the data users share
- Offer strategic advice and tips for improvement
- Explain game mechanics and meta trends
- Keep responses concise
";

/// Assemble the full prompt: system prompt, optional game-data context,
/// optional conversation history, then the current question.
pub fn build_prompt(
    prompt: &str,
    context_data: Option<&Value>,
    conversation_history: Option<&[ChatMessage]>,
) -> String {
    let mut full_prompt = format!("{}\n\n", SYSTEM_PROMPT);

    if let Some(context) = context_data {
        full_prompt.push_str("User's Game Data Context:\n");
        full_prompt.push_str(&format!("```json\n{}\n```\n\n", context));
    }

    if let Some(history) = conversation_history {
        full_prompt.push_str("Previous Conversation:\n");
        for message in history {
            match message.role.as_str() {
                "assistant" => {
                    full_prompt.push_str(&format!("Assistant: {}\n", message.content));
                }
                _ => {
                    full_prompt.push_str(&format!("User: {}\n", message.content));
                }
            }
        }
        full_prompt.push('\n');
    }

    full_prompt.push_str(&format!("User: {}\nAssistant:", prompt));
    full_prompt
}

/// Trait for AI backends.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Generate a completion for a fully assembled prompt.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AiError>;
}

/// Gemini REST backend.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl AiBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Sending request to Gemini model: {}", model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::BackendUnavailable(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AiError::ResponseParseError(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AiError::ResponseParseError("no candidates in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_starts_with_system_prompt() {
        let prompt = build_prompt("How do I peel?", None, None);

        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("User: How do I peel?\nAssistant:"));
    }

    #[test]
    fn test_prompt_includes_context_block() {
        let context = serde_json::json!({"champion_mastery": {"Jinx": {"level": 7}}});
        let prompt = build_prompt("Question", Some(&context), None);

        assert!(prompt.contains("User's Game Data Context:"));
        assert!(prompt.contains("champion_mastery"));
    }

    #[test]
    fn test_prompt_replays_history_in_order() {
        let history = vec![
            ChatMessage {
                role: "user".to_string(),
                content: "How can I improve my KDA on Jinx?".to_string(),
            },
            ChatMessage {
                role: "assistant".to_string(),
                content: "Great question!".to_string(),
            },
        ];
        let prompt = build_prompt("What about my positioning?", None, Some(&history));

        let user_pos = prompt.find("User: How can I improve").unwrap();
        let assistant_pos = prompt.find("Assistant: Great question!").unwrap();
        let current_pos = prompt.find("User: What about my positioning?").unwrap();
        assert!(user_pos < assistant_pos);
        assert!(assistant_pos < current_pos);
    }

    #[test]
    fn test_gemini_response_parsing() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Ward more, die less."}]}}
            ]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(json).unwrap();

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap();
        assert_eq!(text, "Ward more, die less.");
    }
}
