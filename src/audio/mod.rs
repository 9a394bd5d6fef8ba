//! Audio system for footstep playback
//!
//! Built on top of the rodio audio library.
//! Supports WAV, MP3, OGG, and FLAC formats.

mod footsteps;
mod manager;
mod source;

pub use footsteps::Footsteps;
pub use manager::AudioManager;
pub use source::{AudioError, AudioSource};
