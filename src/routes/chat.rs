use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::RelayError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    // Credential check comes before the body is looked at.
    state.relay.api_key()?;

    let Json(request) = payload?;
    let reply = state.relay.relay(&request.message).await?;

    Ok(Json(ChatResponse::success(reply)))
}
