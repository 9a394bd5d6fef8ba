//! Audio source for playing individual sounds

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, Sink, mixer::Mixer};

/// A short clip that can be retriggered from the start
///
/// The decoded bytes are kept so every trigger re-decodes a fresh copy;
/// a retrigger cuts off a clip still playing.
pub struct AudioSource {
    /// The audio sink for playback control
    sink: Sink,
    /// Raw encoded clip bytes
    bytes: Arc<[u8]>,
    /// Source name for debugging
    name: String,
}

impl AudioSource {
    /// Create a new audio source from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn from_file(mixer: &Mixer, path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| AudioError::IoError(e.to_string()))?
            .into();

        // Validate the clip up front so triggers cannot fail later
        Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        let sink = Sink::connect_new(mixer);

        Ok(Self { sink, bytes, name })
    }

    /// Restart the clip from the beginning
    pub fn trigger(&mut self) {
        if !self.sink.empty() {
            self.sink.clear();
        }
        if let Ok(source) = Decoder::new(Cursor::new(self.bytes.clone())) {
            self.sink.append(source);
        }
        self.sink.play();
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.sink.stop();
    }

    /// Set the volume (0.0 = silent, 1.0 = normal, >1.0 = amplified)
    pub fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.max(0.0));
    }

    /// Get the current volume
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sink.volume()
    }

    /// Set playback speed (1.0 = normal)
    pub fn set_speed(&mut self, speed: f32) {
        self.sink.set_speed(speed.max(0.1));
    }

    /// Get the current playback speed
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.sink.speed()
    }

    /// Check if the clip is currently audible
    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.sink.empty() && !self.sink.is_paused()
    }

    /// Get the source name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSource")
            .field("name", &self.name)
            .field("volume", &self.sink.volume())
            .field("playing", &self.is_playing())
            .finish()
    }
}

/// Errors that can occur during audio operations
#[derive(Debug, Clone)]
pub enum AudioError {
    /// IO error reading file
    IoError(String),
    /// Error decoding audio data
    DecodeError(String),
    /// No audio device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecodeError(e) => write!(f, "Decode error: {e}"),
            Self::NoDevice => write!(f, "No audio output device available"),
        }
    }
}

impl std::error::Error for AudioError {}
