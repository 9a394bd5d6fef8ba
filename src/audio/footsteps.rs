//! Footstep playback driven by step events

use std::path::Path;

use crate::audio::AudioManager;
use crate::core::{EventQueue, GameEvent};

const CLIP: &str = "footsteps";

/// Playback speed while running
const RUN_SPEED: f32 = 1.25;

/// Replays the footstep clip once per footfall
///
/// Missing clip, bad file, or no output device degrades to silence with
/// a warning; audio failure is never fatal.
#[derive(Debug)]
pub struct Footsteps {
    manager: Option<AudioManager>,
}

impl Footsteps {
    pub fn new(clip: Option<impl AsRef<Path>>) -> Self {
        let Some(path) = clip else {
            log::info!("No footstep clip configured, running silent");
            return Self { manager: None };
        };

        let manager = match AudioManager::new() {
            Ok(mut manager) => match manager.load(CLIP, path) {
                Ok(()) => Some(manager),
                Err(e) => {
                    log::warn!("Footstep clip failed to load: {e}");
                    None
                }
            },
            Err(e) => {
                log::warn!("Audio unavailable: {e}");
                None
            }
        };
        Self { manager }
    }

    /// Replay the clip for each step event this frame
    pub fn handle_events(&mut self, events: &EventQueue) {
        let Some(manager) = &mut self.manager else {
            return;
        };

        for event in events.iter() {
            if let GameEvent::StepTaken { running, .. } = event {
                manager.set_speed(CLIP, if *running { RUN_SPEED } else { 1.0 });
                manager.play(CLIP);
            }
        }
    }

    /// Whether a clip is loaded and an output device was found
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.manager.is_some()
    }

    /// Stop any clip still sounding
    pub fn stop(&mut self) {
        if let Some(manager) = &mut self.manager {
            manager.stop_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_no_clip_runs_silent() {
        let footsteps = Footsteps::new(None::<&Path>);
        assert!(!footsteps.enabled());
    }

    #[test]
    fn test_missing_file_degrades() {
        let footsteps = Footsteps::new(Some("/nonexistent/steps.ogg"));
        assert!(!footsteps.enabled());
    }

    #[test]
    fn test_events_ignored_when_silent() {
        let mut footsteps = Footsteps::new(None::<&Path>);
        let mut events = EventQueue::new();
        events.push(GameEvent::StepTaken {
            position: Vec3::ZERO,
            running: false,
        });
        events.swap();

        // Must not panic without a manager
        footsteps.handle_events(&events);
    }
}
