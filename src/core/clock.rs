use std::time::{Duration, Instant};

/// Longest frame delta handed to the camera, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Frame clock: delta time between ticks, capped so a stalled frame (window
/// drag, breakpoint) does not fling the camera across the scene
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    max_delta: f32,
    frames: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta,
            frames: 0,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds, at most `max_delta`
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Tick against an explicit instant; `tick` uses the current time
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.frames += 1;
        clamp_delta(delta, self.max_delta)
    }

    /// Number of ticks since creation or the last reset
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.frames = 0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_delta(delta: Duration, max_delta: f32) -> f32 {
    delta.as_secs_f32().min(max_delta)
}
