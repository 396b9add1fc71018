//! LLM client — the single point of entry for all chat-completion calls.
//!
//! No other module may call the completion API directly; the assembler goes
//! through the `TextGenerator` trait so tests can substitute a stub.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all completion calls. Hardcoded to prevent drift.
pub const MODEL: &str = "gpt-4";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion returned no choices")]
    EmptyChoices,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// A text-generation backend: system prompt + user prompt in, plain text out.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Production client for the OpenAI chat-completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let text = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyChoices)?;

        debug!("completion succeeded: {} chars", text.len());
        Ok(text)
    }
}
