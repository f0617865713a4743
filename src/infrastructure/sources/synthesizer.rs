use super::{AudioHandle, AudioSource, SourceError};
use crate::domain::playback::Utterance;
use crate::domain::voice::VoiceDescriptor;
use async_trait::async_trait;
use std::sync::Arc;

/// Port over a platform speech capability: an enumerable voice list (possibly
/// empty until the platform's voices-changed notification fires) and an
/// operation to speak a text with a given voice, with immediate cancellation.
///
/// No byte-level output is retrievable from implementations; this is a
/// permanent platform limitation the caller must accept.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SourceError>;

    /// Start speaking. The returned handle carries no artifact; it reports
    /// the terminal outcome and supports immediate cancellation.
    async fn speak(&self, text: &str, voice: &str) -> Result<AudioHandle, SourceError>;
}

/// Audio source that drives a [`SpeechSynthesizer`]
pub struct SynthesizerSource {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SynthesizerSource {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SourceError> {
        self.synthesizer.list_voices().await
    }
}

#[async_trait]
impl AudioSource for SynthesizerSource {
    async fn begin(&self, utterance: &Utterance) -> Result<AudioHandle, SourceError> {
        tracing::info!(
            voice = %utterance.voice,
            text_length = utterance.text.len(),
            "Starting platform speech synthesis"
        );
        self.synthesizer.speak(&utterance.text, &utterance.voice).await
    }

    fn downloadable(&self) -> bool {
        false
    }
}
