// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ChatResponse;

/// Everything that can go wrong while relaying a chat message.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Server configuration error")]
    Configuration,

    #[error("Message cannot be empty")]
    InvalidInput,

    /// Transport failure, timeout, or a non-2xx reply from the provider.
    /// `status` is the provider's status code when a response was received.
    #[error("API request failed: {detail}")]
    Upstream {
        status: Option<StatusCode>,
        detail: String,
    },

    #[error("An unexpected error occurred: {0}")]
    MalformedResponse(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidInput => StatusCode::BAD_REQUEST,
            RelayError::Upstream {
                status: Some(status),
                ..
            } => *status,
            RelayError::Configuration
            | RelayError::Upstream { status: None, .. }
            | RelayError::MalformedResponse(_)
            | RelayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RelayError::MalformedResponse(err.to_string());
        }
        RelayError::Upstream {
            status: err
                .status()
                .and_then(|s| StatusCode::from_u16(s.as_u16()).ok()),
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for RelayError {
    fn from(rejection: JsonRejection) -> Self {
        RelayError::Unexpected(rejection.body_text())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), "{message}");
        } else {
            tracing::error!(status = status.as_u16(), "{message}");
        }

        (status, Json(ChatResponse::error(message))).into_response()
    }
}
