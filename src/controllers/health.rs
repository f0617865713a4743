use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::controllers::audio::AudioController;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(controller): State<Arc<AudioController>>) -> impl IntoResponse {
    if controller.entries().is_empty() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "audio_files": 0,
                "voices": controller.catalog().len(),
            })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "audio_files": controller.entries().len(),
                "voices": controller.catalog().len(),
            })),
        )
    }
}
