use crate::infrastructure::sources::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// The utterance text failed validation; playback never started
    #[error("invalid text: {0}")]
    Validation(String),

    /// The lookup endpoint rejected the request or was unreachable
    #[error("{0}")]
    SourceUnavailable(String),

    /// The platform signalled a failure during synthesis or output
    #[error("{0}")]
    Playback(String),

    /// No retrievable byte stream exists for a download request
    #[error("{0}")]
    UnsupportedDownload(String),
}

impl From<SourceError> for PlaybackError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(msg) => PlaybackError::SourceUnavailable(msg),
            SourceError::Synthesis(msg) => PlaybackError::Playback(msg),
        }
    }
}
