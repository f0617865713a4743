
pub use api_client::TestClient;

use std::sync::Arc;
use voicebox_backend::controllers::audio::AudioController;
use voicebox_backend::domain::voice::{builtin_voices, VoiceCatalog};
use voicebox_backend::infrastructure::http::build_router;

/// Start the app on an ephemeral port with the standard lookup table and
/// built-in voices. Returns the base URL.
pub async fn spawn_app() -> String {
    spawn_with_controller(AudioController::with_base_url(
        "https://example.com",
        VoiceCatalog::new(builtin_voices()),
    ))
    .await
}

/// Start the app with an empty audio lookup table, so every lookup fails the
/// way an unsupported language does.
pub async fn spawn_app_without_audio() -> String {
    spawn_with_controller(AudioController::new(
        Vec::new(),
        VoiceCatalog::new(builtin_voices()),
    ))
    .await
}

async fn spawn_with_controller(controller: AudioController) -> String {
    let app = build_router(Arc::new(controller));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    format!("http://{}", addr)
}
