use web_time::{Duration, Instant};

/// Frame pacing: smoothed FPS plus an optional frame cap on top of vsync.
pub struct FrameTiming {
    /// Minimum frame duration (zero = unlimited).
    min_frame_duration: Duration,
    last_frame: Instant,
    /// Exponential moving average of instantaneous FPS.
    smoothed_fps: f32,
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer capped at `max_fps` (0 = unlimited).
    #[must_use]
    pub fn new(max_fps: u32) -> Self {
        Self {
            min_frame_duration: min_frame_duration(max_fps),
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.min_frame_duration.is_zero()
            || self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Record that a frame was presented.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + (1.0 / frame_time) * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

fn min_frame_duration(max_fps: u32) -> Duration {
    if max_fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / f64::from(max_fps))
    }
}
