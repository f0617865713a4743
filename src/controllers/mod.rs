pub mod audio;
pub mod health;

pub use audio::{AudioController, AudioEntry, AudioUrlResponse};
