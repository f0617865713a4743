use super::{AudioHandle, PlaybackOutcome, SourceError, SpeechSynthesizer};
use crate::domain::voice::VoiceDescriptor;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// [`SpeechSynthesizer`] backed by the espeak-ng command line tool. Speaking
/// spawns one process per utterance; cancellation kills it immediately.
pub struct EspeakSynthesizer {
    command: String,
}

impl EspeakSynthesizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SourceError> {
        let output = Command::new(&self.command)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                SourceError::Synthesis(format!("failed to run {} --voices: {}", self.command, e))
            })?;

        if !output.status.success() {
            return Err(SourceError::Synthesis(format!(
                "{} --voices exited with {}",
                self.command, output.status
            )));
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let voices = parse_voice_listing(&listing);
        tracing::info!(count = voices.len(), "Enumerated synthesizer voices");
        Ok(voices)
    }

    async fn speak(&self, text: &str, voice: &str) -> Result<AudioHandle, SourceError> {
        let mut cmd = Command::new(&self.command);
        if !voice.is_empty() {
            cmd.arg("-v").arg(voice);
        }
        let mut child = cmd
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SourceError::Synthesis(format!("failed to launch {}: {}", self.command, e))
            })?;

        let (handle, mut task) = AudioHandle::channel(None);

        tokio::spawn(async move {
            let waited = tokio::select! {
                status = child.wait() => Some(status),
                _ = task.cancelled() => None,
            };
            match waited {
                Some(Ok(status)) if status.success() => task.finish(PlaybackOutcome::Played),
                Some(Ok(status)) => task.finish(PlaybackOutcome::Failed(format!(
                    "speech process exited with {}",
                    status
                ))),
                Some(Err(e)) => task.finish(PlaybackOutcome::Failed(format!(
                    "failed to wait for speech process: {}",
                    e
                ))),
                None => {
                    // Cancelled: silence the process right away
                    let _ = child.start_kill();
                }
            }
        });

        Ok(handle)
    }
}

/// Parse the tabular output of `espeak-ng --voices`. Columns are
/// `Pty Language Age/Gender VoiceName File ...`; the header line is skipped.
fn parse_voice_listing(listing: &str) -> Vec<VoiceDescriptor> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 5 {
                return None;
            }
            let language_tag = columns[1].to_string();
            let name = columns[3].to_string();
            Some(VoiceDescriptor {
                identifier: name.clone(),
                display_name: name.clone(),
                language_tag,
                is_default: name.eq_ignore_ascii_case("default"),
            })
        })
        .collect()
}
