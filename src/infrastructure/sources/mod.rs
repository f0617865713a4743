pub mod espeak;
pub mod lookup;
pub mod synthesizer;

pub use espeak::EspeakSynthesizer;
pub use lookup::LookupAudioSource;
pub use synthesizer::{SpeechSynthesizer, SynthesizerSource};

use crate::domain::playback::Utterance;
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Terminal result of one playback attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Played,
    Failed(String),
}

/// Errors an audio source can report before playback begins
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The lookup endpoint rejected the request or could not be reached
    #[error("{0}")]
    Unavailable(String),

    /// The speech capability failed to start synthesis
    #[error("{0}")]
    Synthesis(String),
}

/// Locator for a playable (and downloadable) audio resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub url: String,
    pub content_type: String,
}

impl AudioArtifact {
    pub fn mp3(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: "audio/mpeg".to_string(),
        }
    }
}

/// Owning reference to in-flight audio. Exactly one exists per playback
/// session; cancelling it (or dropping its stop guard) silences the audio
/// and discards the pending outcome.
pub struct AudioHandle {
    artifact: Option<AudioArtifact>,
    cancel_tx: Option<oneshot::Sender<()>>,
    outcome_rx: oneshot::Receiver<PlaybackOutcome>,
}

impl AudioHandle {
    /// Create a handle plus the driver-side task half that backends use to
    /// observe cancellation and report the terminal outcome.
    pub fn channel(artifact: Option<AudioArtifact>) -> (AudioHandle, AudioTask) {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let (outcome_tx, outcome_rx) = oneshot::channel();
        (
            AudioHandle {
                artifact,
                cancel_tx: Some(cancel_tx),
                outcome_rx,
            },
            AudioTask {
                cancel_rx,
                outcome_tx,
            },
        )
    }

    pub fn artifact(&self) -> Option<&AudioArtifact> {
        self.artifact.as_ref()
    }

    /// Request immediate cancellation. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Break the handle apart: the artifact (if any), a guard that cancels
    /// the audio when triggered or dropped, and the outcome receiver.
    pub fn split(
        self,
    ) -> (
        Option<AudioArtifact>,
        StopGuard,
        oneshot::Receiver<PlaybackOutcome>,
    ) {
        (
            self.artifact,
            StopGuard {
                cancel_tx: self.cancel_tx,
            },
            self.outcome_rx,
        )
    }
}

/// Cancels the associated audio when triggered or dropped
pub struct StopGuard {
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl StopGuard {
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for StopGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Driver half of an [`AudioHandle`]
pub struct AudioTask {
    cancel_rx: oneshot::Receiver<()>,
    outcome_tx: oneshot::Sender<PlaybackOutcome>,
}

impl AudioTask {
    /// Resolves when the handle side requested cancellation or went away
    pub async fn cancelled(&mut self) {
        let _ = (&mut self.cancel_rx).await;
    }

    pub fn finish(self, outcome: PlaybackOutcome) {
        let _ = self.outcome_tx.send(outcome);
    }
}

/// One backend capable of turning an utterance into live audio.
///
/// Two implementations exist: [`LookupAudioSource`] resolves a hosted media
/// URL through the audio lookup endpoint, [`SynthesizerSource`] drives a
/// platform speech capability. The playback controller depends only on this
/// trait.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Start exactly one generation for the utterance. On success the audio
    /// is sounding and the returned handle owns it.
    async fn begin(&self, utterance: &Utterance) -> Result<AudioHandle, SourceError>;

    /// Whether this source can materialize a downloadable artifact. Live
    /// platform synthesis cannot: it exposes no retrievable byte stream.
    fn downloadable(&self) -> bool;
}
