use crate::{ListOptions, ScrollPhase, ScrollSnapshot};

/// A decelerating fling: velocity decays geometrically, `v(t) = v0 * e^(-k t)`.
///
/// Offsets are in pixels, velocities in px/s and times in host-supplied milliseconds. The
/// trajectory itself is unbounded; [`ScrollController`] clamps its samples to the scroll range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingTrajectory {
    pub start_offset: i64,
    /// Initial velocity in offset space (positive = offset grows).
    pub velocity: f64,
    pub start_ms: u64,
    /// Decay rate `k`, per second.
    pub friction: f64,
    /// Time until `|v(t)|` falls below the stop velocity.
    pub duration_ms: u64,
}

impl FlingTrajectory {
    pub fn new(
        start_offset: i64,
        velocity: f64,
        start_ms: u64,
        friction: f64,
        stop_velocity: f64,
    ) -> Self {
        let speed = velocity.abs();
        let duration_ms = if speed > stop_velocity {
            ((speed / stop_velocity).ln() / friction * 1000.0).ceil() as u64
        } else {
            0
        };
        Self {
            start_offset,
            velocity,
            start_ms,
            friction,
            duration_ms,
        }
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    fn elapsed_secs(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms).min(self.duration_ms);
        elapsed as f64 / 1000.0
    }

    /// Offset at `now_ms`. Samples past the end return the resting offset.
    pub fn sample(&self, now_ms: u64) -> i64 {
        let t = self.elapsed_secs(now_ms);
        let travelled = self.velocity / self.friction * (1.0 - (-self.friction * t).exp());
        self.start_offset.saturating_add(travelled.round() as i64)
    }

    pub fn velocity_at(&self, now_ms: u64) -> f64 {
        if self.is_finished(now_ms) {
            return 0.0;
        }
        self.velocity * (-self.friction * self.elapsed_secs(now_ms)).exp()
    }

    pub fn final_offset(&self) -> i64 {
        self.sample(self.start_ms.saturating_add(self.duration_ms))
    }
}

/// Owns the scroll offset, the fling trajectory and bounds clamping.
///
/// The controller never touches items. Each layout pass asks it for the offset to reach
/// ([`ScrollController::resolve_target`]), runs the fill engine, then commits the result.
///
/// Offsets grow when content moves left. `max_offset` stays `None` until the last item has been
/// measured; after that, `0 <= current_offset <= max_offset` holds after every pass.
#[derive(Clone, Debug)]
pub struct ScrollController {
    options: ListOptions,
    phase: ScrollPhase,
    current_offset: i64,
    target_offset: i64,
    max_offset: Option<i64>,
    fling: Option<FlingTrajectory>,
}

impl ScrollController {
    pub fn new(options: ListOptions) -> Self {
        Self {
            options,
            phase: ScrollPhase::Idle,
            current_offset: 0,
            target_offset: 0,
            max_offset: None,
            fling: None,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options. Disabling scroll or fling stops the motion it would forbid.
    pub fn set_options(&mut self, options: ListOptions) {
        self.options = options;
        if !options.scroll_enabled {
            self.cancel_fling();
            self.end_drag();
        } else if !options.fling_enabled {
            self.cancel_fling();
        }
    }

    pub fn set_scroll_enabled(&mut self, scroll_enabled: bool) {
        self.set_options(self.options.with_scroll_enabled(scroll_enabled));
    }

    pub fn set_fling_enabled(&mut self, fling_enabled: bool) {
        self.set_options(self.options.with_fling_enabled(fling_enabled));
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase != ScrollPhase::Idle
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    pub fn current_offset(&self) -> i64 {
        self.current_offset
    }

    pub fn target_offset(&self) -> i64 {
        self.target_offset
    }

    pub fn max_offset(&self) -> Option<i64> {
        self.max_offset
    }

    pub fn fling_trajectory(&self) -> Option<&FlingTrajectory> {
        self.fling.as_ref()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            offset: self.current_offset,
            max_offset: self.max_offset,
            phase: self.phase,
        }
    }

    /// Enters `Dragging`, cancelling any fling. Returns `false` when scrolling is disabled.
    pub fn begin_drag(&mut self) -> bool {
        if !self.options.scroll_enabled {
            return false;
        }
        self.fling = None;
        self.phase = ScrollPhase::Dragging;
        htrace!(offset = self.target_offset, "begin_drag");
        true
    }

    /// Moves the target by `delta` pixels; positive deltas move content left.
    ///
    /// A drag delta without a preceding [`ScrollController::begin_drag`] (e.g. a wheel step)
    /// starts the drag implicitly.
    pub fn drag_by(&mut self, delta: i64) -> bool {
        if self.phase != ScrollPhase::Dragging && !self.begin_drag() {
            return false;
        }
        self.target_offset = self.target_offset.saturating_add(delta);
        true
    }

    /// Leaves `Dragging` without a fling.
    pub fn end_drag(&mut self) {
        if self.phase == ScrollPhase::Dragging {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Launches a fling from the target offset.
    ///
    /// `velocity_x` is the pointer velocity in px/s; a pointer moving left (negative) flings
    /// toward larger offsets. Returns `false` and ends any drag when flinging is disabled or the
    /// velocity is too small to move.
    pub fn fling(&mut self, velocity_x: f32, now_ms: u64) -> bool {
        if !self.options.scroll_enabled || !self.options.fling_enabled || !velocity_x.is_finite() {
            self.end_drag();
            return false;
        }
        let trajectory = FlingTrajectory::new(
            self.target_offset,
            -(velocity_x as f64),
            now_ms,
            self.options.effective_friction(),
            self.options.effective_stop_velocity(),
        );
        if trajectory.duration_ms == 0 {
            self.end_drag();
            return false;
        }
        htrace!(
            from = trajectory.start_offset,
            velocity = trajectory.velocity,
            duration_ms = trajectory.duration_ms,
            "fling"
        );
        self.fling = Some(trajectory);
        self.phase = ScrollPhase::Flinging;
        true
    }

    /// Drops the fling; the target stays wherever the last sample put it.
    pub fn cancel_fling(&mut self) {
        if self.fling.take().is_some() && self.phase == ScrollPhase::Flinging {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Advances the fling to `now_ms` and clamps the target to `[0, max_offset]`.
    ///
    /// Clamping ends the fling early. Returns the offset the pass should reach.
    pub fn resolve_target(&mut self, now_ms: u64) -> i64 {
        if let Some(fling) = self.fling {
            self.target_offset = fling.sample(now_ms);
            if fling.is_finished(now_ms) {
                htrace!(offset = self.target_offset, "fling settled");
                self.cancel_fling();
            }
        }
        self.clamp_target();
        self.target_offset
    }

    fn clamp_target(&mut self) -> bool {
        let upper = self.max_offset.unwrap_or(i64::MAX);
        let clamped = self.target_offset.clamp(0, upper);
        if clamped == self.target_offset {
            return false;
        }
        self.target_offset = clamped;
        if self.fling.is_some() {
            htrace!(offset = clamped, "fling clamped at bound");
            self.cancel_fling();
        }
        true
    }

    pub(crate) fn commit(&mut self, offset: i64) {
        self.current_offset = offset;
    }

    /// Records a maximum discovered by the fill engine. The bound only moves down.
    pub(crate) fn tighten_max_offset(&mut self, candidate: i64) {
        let next = match self.max_offset {
            Some(max) => max.min(candidate),
            None => candidate,
        };
        if self.max_offset != Some(next) {
            hdebug!(max_offset = next, "max offset tightened");
        }
        self.max_offset = Some(next);
    }

    /// Re-clamps after a pass discovered a bound below the committed offset.
    ///
    /// Returns the corrected target when another fill is needed.
    pub(crate) fn reclamp(&mut self) -> Option<i64> {
        let max = self.max_offset?;
        if self.current_offset <= max && self.target_offset <= max {
            return None;
        }
        self.clamp_target();
        (self.target_offset != self.current_offset).then_some(self.target_offset)
    }

    /// The window was torn down: content origin is back at the viewport origin and the bound is
    /// unknown again. The target is kept so the next pass rebuilds at the same position.
    pub(crate) fn rebase_for_rebuild(&mut self) {
        self.current_offset = 0;
        self.max_offset = None;
    }

    /// Returns to offset 0 with no motion and an unknown bound.
    pub fn reset(&mut self) {
        self.fling = None;
        self.phase = ScrollPhase::Idle;
        self.current_offset = 0;
        self.target_offset = 0;
        self.max_offset = None;
    }

    /// Seeds the target offset, e.g. from a [`ScrollSnapshot`]. Cancels any fling.
    pub fn scroll_to(&mut self, offset: i64) {
        self.cancel_fling();
        self.target_offset = offset.max(0);
    }
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ListOptions::default())
    }
}
