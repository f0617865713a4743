use super::{DownloadArtifact, PlaybackError, PlaybackState, SessionId, Utterance};
use crate::infrastructure::sources::{
    AudioHandle, AudioSource, PlaybackOutcome, SourceError, StopGuard,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Owns the lifecycle of "convert text to audio" and "play/stop": a small
/// state machine driven by play/stop requests and by completion callbacks
/// from the injected [`AudioSource`].
///
/// At most one generation is outstanding at any time. Every spawned
/// completion path re-checks the session id it was issued under and discards
/// itself if a newer session has started, so a slow superseded request can
/// never clobber a faster newer one.
pub struct PlaybackController {
    source: Arc<dyn AudioSource>,
    shared: Shared,
}

#[derive(Clone)]
struct Shared {
    inner: Arc<Mutex<Inner>>,
    state_tx: Arc<watch::Sender<PlaybackState>>,
}

struct Inner {
    state: PlaybackState,
    session: SessionId,
    active: Option<ActiveSession>,
    last_download: Option<DownloadArtifact>,
}

struct ActiveSession {
    utterance: Utterance,
    /// Present once the resource is sounding; None while still generating
    stop: Option<StopGuard>,
}

impl PlaybackController {
    pub fn new(source: Arc<dyn AudioSource>) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::Idle);
        Self {
            source,
            shared: Shared {
                inner: Arc::new(Mutex::new(Inner {
                    state: PlaybackState::Idle,
                    session: SessionId::default(),
                    active: None,
                    last_download: None,
                })),
                state_tx: Arc::new(state_tx),
            },
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.shared.lock().state.clone()
    }

    /// Subscribe to state changes
    pub fn state_watch(&self) -> watch::Receiver<PlaybackState> {
        self.shared.state_tx.subscribe()
    }

    /// Start playing the utterance, superseding anything already in flight.
    ///
    /// Requesting the utterance that is currently sounding toggles playback
    /// off instead of regenerating it. Requesting anything else while audio
    /// is in flight is stop-then-start: audio never overlaps.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_play(&self, utterance: Utterance) -> Result<(), PlaybackError> {
        if utterance.text.trim().is_empty() {
            return Err(PlaybackError::Validation("text cannot be empty".to_string()));
        }

        let session;
        {
            let mut inner = self.shared.lock();

            if inner.state == PlaybackState::Playing
                && inner.active.as_ref().is_some_and(|a| a.utterance == utterance)
            {
                tracing::info!("Play requested for the sounding utterance; stopping");
                self.shared.stop_locked(&mut inner);
                return Ok(());
            }

            self.shared.stop_locked(&mut inner);
            inner.session = inner.session.next();
            session = inner.session;
            inner.active = Some(ActiveSession {
                utterance: utterance.clone(),
                stop: None,
            });
            self.shared.set_state(&mut inner, PlaybackState::Generating);
        }

        tracing::info!(
            language = %utterance.language,
            voice = %utterance.voice,
            text_length = utterance.text.len(),
            "Generation started"
        );

        let source = Arc::clone(&self.source);
        let shared = self.shared.clone();
        tokio::spawn(async move {
            match source.begin(&utterance).await {
                Ok(handle) => shared.on_ready(session, handle),
                Err(err) => shared.on_failed(session, err),
            }
        });

        Ok(())
    }

    /// Cancel any in-flight generation or playback and return to `Idle`.
    /// Idempotent: stopping when already idle is a no-op.
    pub fn request_stop(&self) {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner);
    }

    /// Materialize the most recent successful generation as a downloadable
    /// artifact. Not a state transition.
    pub fn request_download(&self) -> Result<DownloadArtifact, PlaybackError> {
        if !self.source.downloadable() {
            return Err(PlaybackError::UnsupportedDownload(
                "live speech synthesis has no retrievable audio stream".to_string(),
            ));
        }
        self.shared
            .lock()
            .last_download
            .clone()
            .ok_or_else(|| {
                PlaybackError::UnsupportedDownload("no generated audio available".to_string())
            })
    }

    /// Clear a held error message back to `Idle`. No-op in any other state.
    pub fn dismiss_error(&self) {
        let mut inner = self.shared.lock();
        if matches!(inner.state, PlaybackState::Error(_)) {
            self.shared.set_state(&mut inner, PlaybackState::Idle);
        }
    }

    /// Teardown: cancel pending work, release the audio handle and ignore
    /// all further callbacks.
    pub fn shutdown(&self) {
        self.request_stop();
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        self.shared.stop_locked(&mut inner);
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panic elsewhere; the state itself
        // stays usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, inner: &mut Inner, state: PlaybackState) {
        tracing::debug!(from = ?inner.state, to = ?state, "Playback state change");
        inner.state = state.clone();
        self.state_tx.send_replace(state);
    }

    /// Invalidate the current session and silence any active audio. Late
    /// callbacks from the invalidated session will find a mismatching id and
    /// discard themselves.
    fn stop_locked(&self, inner: &mut Inner) {
        inner.session = inner.session.next();
        if let Some(mut active) = inner.active.take() {
            if let Some(mut stop) = active.stop.take() {
                stop.cancel();
            }
        }
        if inner.state != PlaybackState::Idle {
            self.set_state(inner, PlaybackState::Idle);
        }
    }

    /// The source produced a sounding resource for `session`
    fn on_ready(&self, session: SessionId, mut handle: AudioHandle) {
        let outcome_rx;
        {
            let mut inner = self.lock();
            if inner.session != session {
                tracing::debug!("Discarding resource for superseded session");
                handle.cancel();
                return;
            }
            let Some(active) = inner.active.as_mut() else {
                handle.cancel();
                return;
            };
            let language = active.utterance.language;
            let (artifact, stop, rx) = handle.split();
            active.stop = Some(stop);
            // The most recent successful generation wins, even when it has
            // no retrievable bytes
            inner.last_download = artifact.map(|a| DownloadArtifact::new(a.url, language));
            outcome_rx = rx;
            self.set_state(&mut inner, PlaybackState::Playing);
        }

        let shared = self.clone();
        tokio::spawn(async move {
            let outcome = outcome_rx
                .await
                .unwrap_or_else(|_| PlaybackOutcome::Failed("audio ended unexpectedly".to_string()));
            shared.on_finished(session, outcome);
        });
    }

    /// Playback reached its terminal outcome for `session`
    fn on_finished(&self, session: SessionId, outcome: PlaybackOutcome) {
        let mut inner = self.lock();
        if inner.session != session {
            tracing::debug!("Discarding outcome for superseded session");
            return;
        }
        inner.active = None;
        match outcome {
            PlaybackOutcome::Played => {
                tracing::info!("Playback completed");
                self.set_state(&mut inner, PlaybackState::Idle);
            }
            PlaybackOutcome::Failed(message) => {
                tracing::warn!(error = %message, "Playback failed");
                self.set_state(&mut inner, PlaybackState::Error(message));
            }
        }
    }

    /// Generation failed before a resource was ready for `session`
    fn on_failed(&self, session: SessionId, err: SourceError) {
        let mut inner = self.lock();
        if inner.session != session {
            tracing::debug!("Discarding failure for superseded session");
            return;
        }
        inner.active = None;
        tracing::warn!(error = %err, "Generation failed");
        self.set_state(&mut inner, PlaybackState::Error(err.to_string()));
    }
}
