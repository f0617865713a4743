pub mod playback;
pub mod voice;
