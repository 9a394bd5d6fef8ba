//! Debug and statistics module

use std::collections::VecDeque;
use std::time::Duration;

/// Frame statistics tracker
#[derive(Debug)]
pub struct FrameStats {
    /// Frame time history for averaging
    frame_times: VecDeque<Duration>,
    /// Maximum samples to keep
    max_samples: usize,
    /// Current FPS
    fps: f32,
    /// Average frame time in milliseconds
    avg_frame_time_ms: f32,
    /// Total frames rendered
    total_frames: u64,
}

impl FrameStats {
    /// Create a new frame stats tracker
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(120),
            max_samples: 120,
            fps: 0.0,
            avg_frame_time_ms: 0.0,
            total_frames: 0,
        }
    }

    /// Record a frame with the given delta time
    pub fn record_frame(&mut self, delta: Duration) {
        self.total_frames += 1;

        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta);

        let total: Duration = self.frame_times.iter().sum();
        let count = self.frame_times.len() as f32;
        let total_secs = total.as_secs_f32();

        // Guard against division by zero
        if total_secs > 0.0 {
            self.avg_frame_time_ms = (total_secs / count) * 1000.0;
            self.fps = count / total_secs;
        } else {
            self.avg_frame_time_ms = 0.0;
            self.fps = 0.0;
        }
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_frame_time_ms
    }

    /// Get total frames rendered
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Get a formatted stats string
    pub fn format_stats(&self) -> String {
        format!("FPS: {:.1} | Frame: {:.2}ms", self.fps, self.avg_frame_time_ms)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug readout state
#[derive(Debug, Default)]
pub struct DebugInfo {
    /// Whether the debug readout is shown
    pub enabled: bool,
    /// Frame statistics
    pub frame_stats: FrameStats,
    /// Custom debug lines, rebuilt each frame
    custom_lines: Vec<String>,
}

impl DebugInfo {
    /// Create new debug info
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            frame_stats: FrameStats::new(),
            custom_lines: Vec::new(),
        }
    }

    /// Add a custom debug line
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.custom_lines.push(line.into());
    }

    /// Clear custom lines
    pub fn clear_lines(&mut self) {
        self.custom_lines.clear();
    }

    /// Get all debug lines, stats first
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.frame_stats.format_stats()];
        lines.extend(self.custom_lines.iter().cloned());
        lines
    }

    /// Record a frame
    pub fn record_frame(&mut self, delta: Duration) {
        self.frame_stats.record_frame(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_stats_tracks_fps() {
        let mut stats = FrameStats::new();

        for _ in 0..10 {
            stats.record_frame(Duration::from_millis(20));
        }

        assert_eq!(stats.total_frames(), 10);
        assert!((stats.fps() - 50.0).abs() < 1.0);
        assert!((stats.avg_frame_time_ms() - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stats = FrameStats::new();

        for _ in 0..500 {
            stats.record_frame(Duration::from_millis(16));
        }

        assert_eq!(stats.total_frames(), 500);
        assert!(stats.frame_times.len() <= stats.max_samples);
    }

    #[test]
    fn test_debug_lines_start_with_stats() {
        let mut info = DebugInfo::new(true);
        info.record_frame(Duration::from_millis(16));
        info.add_line("x: 0.00, y: 1.70, z: 5.00");

        let lines = info.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("FPS:"));
        assert_eq!(lines[1], "x: 0.00, y: 1.70, z: 5.00");
    }
}
