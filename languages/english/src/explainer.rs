use async_trait::async_trait;
use quickdef_config::explainer::ExplainerConfig;
use quickdef_core::{Explainer, ProviderMetadata, RemoteError};
use serde::Serialize;

use crate::http::{map_error, status_text};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that explains words in simple terms \
that a 5-year-old would understand. Keep explanations short, friendly, and use simple words.";

fn user_prompt(word: &str) -> String {
    format!("Explain the word \"{word}\" like I'm 5 years old. Keep it simple and fun!")
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// OpenAI-compatible chat-completion client
#[derive(Clone)]
pub struct OpenAiExplainer {
    client: reqwest::Client,
    config: ExplainerConfig,
}

impl OpenAiExplainer {
    pub fn new(client: reqwest::Client, config: &ExplainerConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    pub fn build_request(&self, word: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(word),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl Explainer for OpenAiExplainer {
    async fn explain(&self, word: &str, api_key: &str) -> Result<Option<String>, RemoteError> {
        let request = self.build_request(word);

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_error)?;

        let status = response.status();
        if !status.is_success() {
            let json: serde_json::Value = response.json().await.unwrap_or_default();
            let message = error_message(&json).unwrap_or_else(|| status_text(status));
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            RemoteError::Malformed(format!("Failed to parse completion response: {e}"))
        })?;

        Ok(first_choice_content(&json))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            requires_api_key: true,
        }
    }
}

/// `choices[0].message.content`, if the reply has that shape
pub fn first_choice_content(json: &serde_json::Value) -> Option<String> {
    json["choices"]
        .get(0)
        .and_then(|c| c["message"]["content"].as_str())
        .map(str::to_string)
}

/// Provider-supplied `error.message` of a failed call
pub fn error_message(json: &serde_json::Value) -> Option<String> {
    json["error"]["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
