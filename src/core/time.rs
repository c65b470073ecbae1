//! Animation time accumulator for scrolling fog noise

/// Monotonic seconds counter fed with frame deltas.
///
/// The fog noise is tileable, so the value never needs wrapping here.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    seconds: f32,
    paused: bool,
}

impl AnimationClock {
    /// Create a clock starting at `seconds`.
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds,
            paused: false,
        }
    }

    /// Advance by `dt_seconds`. Non-positive or non-finite deltas and paused
    /// clocks are ignored.
    pub fn advance(&mut self, dt_seconds: f32) {
        if self.paused || !dt_seconds.is_finite() || dt_seconds <= 0.0 {
            return;
        }
        self.seconds += dt_seconds;
    }

    /// Elapsed animation time in seconds.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
