use axum::Json;

use crate::message::HealthResponse;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
