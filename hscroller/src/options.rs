/// Configuration for [`crate::HorizontalList`] and its [`crate::ScrollController`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListOptions {
    /// When disabled, drags are rejected before any state transition. Flings need drags, so this
    /// disables them too.
    pub scroll_enabled: bool,
    /// When disabled, releases always end in `Idle`; drag scrolling keeps working.
    pub fling_enabled: bool,
    /// Exponential decay rate of fling velocity, per second.
    pub fling_friction: f32,
    /// A fling settles once its velocity drops below this, in px/s.
    pub fling_stop_velocity: f32,
}

impl ListOptions {
    pub const DEFAULT_FLING_FRICTION: f32 = 4.2;
    pub const DEFAULT_FLING_STOP_VELOCITY: f32 = 20.0;

    pub fn new() -> Self {
        Self {
            scroll_enabled: true,
            fling_enabled: true,
            fling_friction: Self::DEFAULT_FLING_FRICTION,
            fling_stop_velocity: Self::DEFAULT_FLING_STOP_VELOCITY,
        }
    }

    pub fn with_scroll_enabled(mut self, scroll_enabled: bool) -> Self {
        self.scroll_enabled = scroll_enabled;
        self
    }

    pub fn with_fling_enabled(mut self, fling_enabled: bool) -> Self {
        self.fling_enabled = fling_enabled;
        self
    }

    /// Sets the fling decay rate. Non-positive values fall back to the default.
    pub fn with_fling_friction(mut self, fling_friction: f32) -> Self {
        self.fling_friction = fling_friction;
        self
    }

    pub fn with_fling_stop_velocity(mut self, fling_stop_velocity: f32) -> Self {
        self.fling_stop_velocity = fling_stop_velocity;
        self
    }

    pub(crate) fn effective_friction(&self) -> f64 {
        if self.fling_friction.is_finite() && self.fling_friction > 0.0 {
            self.fling_friction as f64
        } else {
            Self::DEFAULT_FLING_FRICTION as f64
        }
    }

    pub(crate) fn effective_stop_velocity(&self) -> f64 {
        if self.fling_stop_velocity.is_finite() && self.fling_stop_velocity > 0.0 {
            self.fling_stop_velocity as f64
        } else {
            Self::DEFAULT_FLING_STOP_VELOCITY as f64
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new()
    }
}
