use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicebox_backend::controllers::audio::AudioController;
use voicebox_backend::domain::voice::{builtin_voices, VoiceCatalog};
use voicebox_backend::infrastructure::config::{Config, LogFormat};
use voicebox_backend::infrastructure::http::start_http_server;
use voicebox_backend::infrastructure::sources::{EspeakSynthesizer, SpeechSynthesizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Voicebox Backend on {}:{}",
        config.host,
        config.port
    );

    // The catalog starts empty and fills in once voices are known, either
    // from the system synthesizer or from the built-in fallback list
    let synthesizer = EspeakSynthesizer::new(config.synth_command.clone());
    let mut catalog = VoiceCatalog::default();
    match synthesizer.list_voices().await {
        Ok(voices) if !voices.is_empty() => {
            tracing::info!(count = voices.len(), "Loaded voices from system synthesizer");
            catalog.replace(voices);
        }
        Ok(_) => {
            tracing::warn!("System synthesizer reported no voices, using built-in voice list");
            catalog.replace(builtin_voices());
        }
        Err(err) => {
            tracing::warn!(error = %err, "System synthesizer unavailable, using built-in voice list");
            catalog.replace(builtin_voices());
        }
    }

    let audio_controller = Arc::new(AudioController::with_base_url(
        &config.audio_base_url,
        catalog,
    ));
    tracing::info!(
        audio_files = audio_controller.entries().len(),
        "Audio lookup table ready"
    );

    start_http_server(Arc::new(config), audio_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicebox_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicebox_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
