//! Audio manager for managing audio output and sources

use std::collections::HashMap;
use std::path::Path;

use rodio::{OutputStream, OutputStreamBuilder, mixer::Mixer};

use super::source::{AudioError, AudioSource};

/// Manages audio output and all audio sources
pub struct AudioManager {
    /// The output stream (must be kept alive)
    _stream: OutputStream,
    /// The mixer for creating sinks
    mixer: Mixer,
    /// Named audio sources
    sources: HashMap<String, AudioSource>,
    /// Per-source volume settings (before master volume applied)
    source_volumes: HashMap<String, f32>,
    /// Master volume
    master_volume: f32,
}

impl AudioManager {
    /// Create a new audio manager
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output device is available
    pub fn new() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::from_default_device()
            .map_err(|_| AudioError::NoDevice)?
            .open_stream()
            .map_err(|_| AudioError::NoDevice)?;
        let mixer = stream.mixer().clone();

        Ok(Self {
            _stream: stream,
            mixer,
            sources: HashMap::new(),
            source_volumes: HashMap::new(),
            master_volume: 1.0,
        })
    }

    /// Load an audio file and store it with a name
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded
    pub fn load(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<(), AudioError> {
        let name = name.into();
        let source = AudioSource::from_file(&self.mixer, path)?;
        self.sources.insert(name.clone(), source);
        self.source_volumes.insert(name, 1.0);
        Ok(())
    }

    /// Replay an audio source by name from the start
    pub fn play(&mut self, name: &str) -> bool {
        if let Some(source) = self.sources.get_mut(name) {
            let source_vol = self.source_volumes.get(name).copied().unwrap_or(1.0);
            source.set_volume(source_vol * self.master_volume);
            source.trigger();
            true
        } else {
            false
        }
    }

    /// Set playback speed for a specific source
    pub fn set_speed(&mut self, name: &str, speed: f32) -> bool {
        if let Some(source) = self.sources.get_mut(name) {
            source.set_speed(speed);
            true
        } else {
            false
        }
    }

    /// Set volume for a specific source
    pub fn set_volume(&mut self, name: &str, volume: f32) -> bool {
        if let Some(source) = self.sources.get_mut(name) {
            let vol = volume.max(0.0);
            self.source_volumes.insert(name.to_string(), vol);
            source.set_volume(vol * self.master_volume);
            true
        } else {
            false
        }
    }

    /// Set the master volume (affects all sources)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.max(0.0);
        for (name, source) in &mut self.sources {
            let source_vol = self.source_volumes.get(name).copied().unwrap_or(1.0);
            source.set_volume(source_vol * self.master_volume);
        }
    }

    /// Get the master volume
    #[must_use]
    pub const fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Stop all audio sources
    pub fn stop_all(&mut self) {
        for source in self.sources.values_mut() {
            source.stop();
        }
    }

    /// Get the number of loaded sources
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("source_count", &self.sources.len())
            .field("master_volume", &self.master_volume)
            .finish()
    }
}
