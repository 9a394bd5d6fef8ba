//! Frame timing

use std::time::{Duration, Instant};

/// Per-frame clock driven by the render loop
#[derive(Debug)]
pub struct Time {
    /// When the clock was created
    start: Instant,
    /// When the last frame began
    last_frame: Instant,
    /// Duration of the last frame
    delta: Duration,
    /// Total frames ticked
    frame_count: u64,
}

impl Time {
    /// Create a new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance the clock by one frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Duration of the last frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Duration of the last frame in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Seconds since the clock was created
    pub fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Total frames ticked since startup
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_starts_at_zero() {
        let time = Time::new();
        assert_eq!(time.delta(), Duration::ZERO);
        assert_eq!(time.frame_count(), 0);
    }

    #[test]
    fn test_update_advances_frame_count() {
        let mut time = Time::new();
        time.update();
        time.update();
        assert_eq!(time.frame_count(), 2);
    }

    #[test]
    fn test_delta_measures_elapsed_time() {
        let mut time = Time::new();
        std::thread::sleep(Duration::from_millis(5));
        time.update();
        assert!(time.delta() >= Duration::from_millis(5));
        assert!(time.delta_seconds() > 0.0);
    }
}
