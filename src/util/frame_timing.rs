//! Per-frame timing: smoothed FPS and periodic reporting.

use web_time::{Duration, Instant};

/// Frame timing with smoothed FPS and periodic reporting.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames rendered since the timer was created
    frame_count: u64,
    /// Last time [`Self::report_due`] returned true
    last_report: Instant,
}

impl FrameTiming {
    /// Interval between FPS log lines.
    const REPORT_INTERVAL: Duration = Duration::from_secs(5);

    /// Create a new frame timer starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
            frame_count: 0,
            last_report: now,
        }
    }

    /// Call once per rendered frame with the frame's timestamp.
    pub fn end_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Returns true at most once per report interval.
    pub fn report_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_report)
            >= Self::REPORT_INTERVAL
        {
            self.last_report = now;
            return true;
        }
        false
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Total frames recorded.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}
