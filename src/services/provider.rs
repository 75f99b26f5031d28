// src/services/provider.rs
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

pub const MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1024;
pub const STOP_SEQUENCE: &str = "</s>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub stop: Vec<String>,
}

impl CompletionRequest {
    /// Single user turn with the fixed generation parameters.
    pub fn for_user_message(message: &str) -> Self {
        Self {
            model: MODEL.to_string(),
            messages: vec![Turn {
                role: "user".to_string(),
                content: message.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stop: vec![STOP_SEQUENCE.to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice.
    pub fn into_first_content(self) -> Result<String, RelayError> {
        let first = match self.choices {
            Some(choices) if !choices.is_empty() => choices.into_iter().next(),
            _ => None,
        }
        .ok_or_else(|| RelayError::MalformedResponse("Invalid response format from API".into()))?;

        first
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| {
                RelayError::MalformedResponse("first choice has no message content".into())
            })
    }
}

/// Outbound client for the chat-completion provider.
#[derive(Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    api_url: String,
}

impl ProviderClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// One attempt, no retries. Non-2xx replies become `RelayError::Upstream`.
    pub async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, RelayError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<CompletionResponse>().await?)
    }
}
