// src/services/relay.rs
use crate::error::RelayError;
use crate::services::provider::{CompletionRequest, ProviderClient};

const LOG_PREVIEW_CHARS: usize = 100;

/// Forwards one user message to the provider and returns the reply text.
///
/// Holds no mutable state; a single instance serves every request.
#[derive(Clone)]
pub struct ChatRelay {
    api_key: Option<String>,
    provider: ProviderClient,
}

impl ChatRelay {
    pub fn new(api_key: Option<String>, provider: ProviderClient) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            provider,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Result<&str, RelayError> {
        self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("API key not configured");
            RelayError::Configuration
        })
    }

    pub async fn relay(&self, message: &str) -> Result<String, RelayError> {
        let api_key = self.api_key()?;

        let message = message.trim();
        if message.is_empty() {
            return Err(RelayError::InvalidInput);
        }

        let request = CompletionRequest::for_user_message(message);
        tracing::info!(url = %self.provider.api_url(), payload = ?request, "Sending request to provider");

        let reply = self
            .provider
            .complete(api_key, &request)
            .await?
            .into_first_content()?;

        tracing::info!("Received response: {}...", preview(&reply, LOG_PREVIEW_CHARS));
        Ok(reply)
    }
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_provider() -> ProviderClient {
        ProviderClient::new("http://127.0.0.1:9/unused", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 100), "short");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn blank_key_is_not_configured() {
        let relay = ChatRelay::new(Some("  ".to_string()), unreachable_provider());
        assert!(!relay.is_configured());
    }

    #[tokio::test]
    async fn missing_key_wins_over_empty_message() {
        let relay = ChatRelay::new(None, unreachable_provider());
        let err = relay.relay("   ").await.unwrap_err();
        assert!(matches!(err, RelayError::Configuration));
    }

    #[tokio::test]
    async fn whitespace_message_is_invalid() {
        let relay = ChatRelay::new(Some("sk-test".to_string()), unreachable_provider());
        let err = relay.relay(" \n\t ").await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidInput));
    }
}
