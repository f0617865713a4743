use super::{AudioArtifact, AudioHandle, AudioSource, PlaybackOutcome, SourceError};
use crate::domain::playback::Utterance;
use crate::error::ErrorResponse;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Rough speaking rate used to estimate how long a fetched clip sounds for
const CHARACTERS_PER_MINUTE: f32 = 1000.0;

#[derive(Debug, Deserialize)]
struct LookupResponse {
    url: String,
}

/// Audio source backed by the audio lookup endpoint
/// (`GET {base}/api/audio?language=`). The endpoint is treated purely as an
/// opaque resource locator provider; playback runs for the estimated clip
/// length unless cancelled, standing in for the media element's `ended`
/// event.
pub struct LookupAudioSource {
    client: reqwest::Client,
    base_url: String,
    playback_duration: Option<Duration>,
}

impl LookupAudioSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            playback_duration: None,
        }
    }

    /// Fix the simulated playback length instead of estimating it from the
    /// text. Useful for tests and demos.
    pub fn with_playback_duration(mut self, duration: Duration) -> Self {
        self.playback_duration = Some(duration);
        self
    }

    fn duration_for(&self, text: &str) -> Duration {
        self.playback_duration.unwrap_or_else(|| {
            let chars = text.chars().count() as f32;
            Duration::from_secs_f32(chars * 60.0 / CHARACTERS_PER_MINUTE)
        })
    }
}

#[async_trait]
impl AudioSource for LookupAudioSource {
    async fn begin(&self, utterance: &Utterance) -> Result<AudioHandle, SourceError> {
        let endpoint = format!("{}/api/audio", self.base_url);

        tracing::info!(
            language = %utterance.language,
            text_length = utterance.text.len(),
            "Resolving audio through lookup endpoint"
        );

        let response = self
            .client
            .get(&endpoint)
            .query(&[("language", utterance.language.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("audio lookup failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            // Surface the server's own error message when it sent one
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => format!("audio lookup returned {}", status),
            };
            tracing::warn!(status = %status, message = %message, "Audio lookup rejected");
            return Err(SourceError::Unavailable(message));
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Unavailable(format!("malformed lookup response: {}", e)))?;

        tracing::info!(url = %body.url, "Audio resource resolved");

        let duration = self.duration_for(&utterance.text);
        let (handle, mut task) = AudioHandle::channel(Some(AudioArtifact::mp3(body.url)));

        tokio::spawn(async move {
            let played = tokio::select! {
                _ = tokio::time::sleep(duration) => true,
                _ = task.cancelled() => false,
            };
            if played {
                task.finish(PlaybackOutcome::Played);
            }
        });

        Ok(handle)
    }

    fn downloadable(&self) -> bool {
        true
    }
}
