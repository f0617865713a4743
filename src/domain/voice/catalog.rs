use super::language::Language;
use serde::{Deserialize, Serialize};

/// One voice as reported by a speech capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    pub identifier: String,
    pub display_name: String,
    /// BCP-47 style tag, e.g. "en-US" or "ar"
    pub language_tag: String,
    pub is_default: bool,
}

/// A voice paired with the language it implies. Selecting either side of the
/// pair must always produce a consistent whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoicePairing {
    pub voice: VoiceDescriptor,
    pub language: Language,
}

/// The currently known voice list. May be empty until the capability delivers
/// its voices-changed notification, at which point `replace` swaps in the
/// fresh list.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self { voices }
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    /// Swap in a fresh voice list (voices-changed notification)
    pub fn replace(&mut self, voices: Vec<VoiceDescriptor>) {
        self.voices = voices;
    }

    /// Selecting a voice fixes the displayed language to that voice's
    /// language. Returns None for unknown voices or voices whose language the
    /// lookup table does not cover.
    pub fn pair_for_voice(&self, identifier: &str) -> Option<VoicePairing> {
        let voice = self.voices.iter().find(|v| v.identifier == identifier)?;
        let language = Language::from_tag(&voice.language_tag)?;
        Some(VoicePairing {
            voice: voice.clone(),
            language,
        })
    }

    /// Selecting a language picks a matching voice: the default-flagged voice
    /// for that language if one exists, otherwise the first match in list
    /// order. Same list and same selection always yield the same pairing.
    pub fn pair_for_language(&self, language: Language) -> Option<VoicePairing> {
        let matches = || {
            self.voices
                .iter()
                .filter(|v| Language::from_tag(&v.language_tag) == Some(language))
        };
        let voice = matches().find(|v| v.is_default).or_else(|| matches().next())?;
        Some(VoicePairing {
            voice: voice.clone(),
            language,
        })
    }
}

/// Fallback voice list for hosts without a usable speech capability
pub fn builtin_voices() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor {
            identifier: "en-joanna".to_string(),
            display_name: "Joanna".to_string(),
            language_tag: "en-US".to_string(),
            is_default: true,
        },
        VoiceDescriptor {
            identifier: "en-amy".to_string(),
            display_name: "Amy".to_string(),
            language_tag: "en-GB".to_string(),
            is_default: false,
        },
        VoiceDescriptor {
            identifier: "ar-zayd".to_string(),
            display_name: "Zayd".to_string(),
            language_tag: "ar".to_string(),
            is_default: false,
        },
    ]
}
