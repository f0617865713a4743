pub mod catalog;
pub mod language;

pub use catalog::{builtin_voices, VoiceCatalog, VoiceDescriptor, VoicePairing};
pub use language::{Language, UnknownLanguage};
