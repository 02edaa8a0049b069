use web_time::{Duration, Instant};

/// Upper bound on a single frame step. Long stalls (window drag, tab
/// switch) are clamped so a transition does not jump straight to its end.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Per-frame clock: produces clamped frame deltas and a smoothed FPS.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames since the last FPS log line.
    frames_since_report: u32,
    /// When the last FPS log line was written.
    last_report: Instant,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start a new clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            frames_since_report: 0,
            last_report: now,
        }
    }

    /// Advance the clock and return the elapsed seconds since the previous
    /// call, clamped to 100 ms.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed);
        elapsed.min(MAX_FRAME_STEP).as_secs_f32()
    }

    fn record(&mut self, elapsed: Duration) {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        self.frames_since_report += 1;
        if self.last_report.elapsed() >= Duration::from_secs(10) {
            log::debug!(
                "{} frames, {:.1} fps",
                self.frames_since_report,
                self.smoothed_fps
            );
            self.frames_since_report = 0;
            self.last_report = Instant::now();
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
