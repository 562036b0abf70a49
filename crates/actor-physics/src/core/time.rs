/// Reference frame rate the kernel's per-frame quantities are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// Converts wall-clock frame time into `time_mult`, the number of
/// reference frames that elapsed.
pub struct FrameTimer {
    /// Upper bound on a single frame's multiplier.
    max_time_mult: f32,
    /// Multiplier produced by the last tick.
    last: f32,
}

impl FrameTimer {
    /// Timer capped at four reference frames per tick.
    pub fn new() -> Self {
        Self::with_cap(4.0)
    }

    pub fn with_cap(max_time_mult: f32) -> Self {
        Self {
            max_time_mult: max_time_mult.max(f32::EPSILON),
            last: 1.0,
        }
    }

    /// Feed the frame's duration in seconds. Returns the multiplier to pass
    /// to the scene. Long stalls are capped so sub-step searches stay bounded.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let time_mult = if frame_dt.is_finite() { frame_dt.max(0.0) * REFERENCE_FPS } else { self.max_time_mult };
        self.last = time_mult.min(self.max_time_mult);
        self.last
    }

    /// Multiplier from the last tick (1.0 before the first).
    pub fn time_mult(&self) -> f32 {
        self.last
    }

    pub fn max_time_mult(&self) -> f32 {
        self.max_time_mult
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
