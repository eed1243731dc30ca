/// Thresholds for [`crate::GestureTranslator`]. Distances are in logical pixels.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureOptions {
    /// Horizontal travel past which a press becomes a drag. Any travel past it also rules out a
    /// tap or long press.
    pub touch_slop: f32,
    /// How long a press must be held within the slop to become a long press.
    pub long_press_timeout_ms: u64,
    /// Releases slower than this (px/s) end without a fling.
    pub min_fling_velocity: f32,
    /// Release velocities are clamped to this magnitude (px/s).
    pub max_fling_velocity: f32,
}

impl GestureOptions {
    pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;
    pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;
    pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 50.0;
    pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8_000.0;

    pub fn new() -> Self {
        Self {
            touch_slop: Self::DEFAULT_TOUCH_SLOP,
            long_press_timeout_ms: Self::DEFAULT_LONG_PRESS_TIMEOUT_MS,
            min_fling_velocity: Self::DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: Self::DEFAULT_MAX_FLING_VELOCITY,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_long_press_timeout_ms(mut self, long_press_timeout_ms: u64) -> Self {
        self.long_press_timeout_ms = long_press_timeout_ms;
        self
    }

    pub fn with_min_fling_velocity(mut self, min_fling_velocity: f32) -> Self {
        self.min_fling_velocity = min_fling_velocity;
        self
    }

    pub fn with_max_fling_velocity(mut self, max_fling_velocity: f32) -> Self {
        self.max_fling_velocity = max_fling_velocity;
        self
    }

    pub(crate) fn effective_touch_slop(&self) -> f32 {
        if self.touch_slop.is_finite() && self.touch_slop >= 0.0 {
            self.touch_slop
        } else {
            Self::DEFAULT_TOUCH_SLOP
        }
    }
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self::new()
    }
}
