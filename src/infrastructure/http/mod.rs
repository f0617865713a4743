pub mod request_id;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{audio::AudioController, health};
use crate::infrastructure::config::Config;
use request_id::request_id_middleware;

/// Build the application router with all routes configured
pub fn build_router(audio_controller: Arc<AudioController>) -> Router {
    let api_routes = Router::new()
        .route("/api/audio", get(AudioController::lookup))
        .route("/api/audio/all", get(AudioController::list))
        .route("/api/voices", get(AudioController::voices))
        .with_state(audio_controller.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(audio_controller);

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(request_id_middleware))
        // The demo UI is served from another origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    audio_controller: Arc<AudioController>,
) -> anyhow::Result<()> {
    let app = build_router(audio_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
