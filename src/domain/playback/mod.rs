pub mod controller;
pub mod error;

pub use controller::PlaybackController;
pub use error::PlaybackError;

use crate::domain::voice::Language;
use serde::Serialize;

/// Upper bound on utterance text length, matching the product UI
pub const MAX_TEXT_CHARS: usize = 5000;

/// One request to vocalize a given text in a given voice and language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub language: Language,
    pub voice: String,
}

impl Utterance {
    pub fn new(
        text: impl Into<String>,
        language: Language,
        voice: impl Into<String>,
    ) -> Result<Self, PlaybackError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PlaybackError::Validation("text cannot be empty".to_string()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(PlaybackError::Validation(format!(
                "text must be {} characters or less",
                MAX_TEXT_CHARS
            )));
        }
        Ok(Self {
            text,
            language,
            voice: voice.into(),
        })
    }
}

/// Lifecycle of the single active playback session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Generating,
    Playing,
    /// Transient, display-only failure. Behaves like `Idle` for new requests
    /// and clears on dismissal.
    Error(String),
}

/// Monotonically increasing session identifier. Every async result carries
/// the id it was issued for; results whose id no longer matches the current
/// session are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SessionId(u64);

impl SessionId {
    pub fn next(self) -> SessionId {
        SessionId(self.0 + 1)
    }
}

/// The last generated audio materialized as a downloadable artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadArtifact {
    pub url: String,
    pub suggested_filename: String,
}

impl DownloadArtifact {
    pub fn new(url: impl Into<String>, language: Language) -> Self {
        Self {
            url: url.into(),
            suggested_filename: format!("audio-{}.mp3", language),
        }
    }
}
