use crate::{GestureOptions, VelocityTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer sample in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, time_ms: u64) -> Self {
        Self {
            phase,
            x,
            y,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Down, x, y, time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Up, x, y, time_ms)
    }

    pub fn cancel(time_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, 0.0, 0.0, time_ms)
    }
}

/// What a pointer sequence means to a horizontal list.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gesture {
    /// A pointer went down. Any fling in progress should stop.
    Down,
    DragStart,
    /// Content moves by `delta` pixels; positive moves content left.
    Drag { delta: i64 },
    DragEnd,
    /// Release velocity of the pointer in px/s (negative = moving left). Always follows `DragEnd`.
    Fling { velocity: f32 },
    /// A press released within the slop before the long-press timeout, at the press position.
    Tap { x: f32, y: f32 },
    LongPress { x: f32, y: f32 },
}

#[derive(Clone, Copy, Debug)]
struct Press {
    down_x: f32,
    down_y: f32,
    down_ms: u64,
    last_x: f32,
    residual: f32,
    dragging: bool,
    /// Left the slop in any direction; no tap or long press can follow.
    wandered: bool,
    long_pressed: bool,
}

/// Turns raw pointer events into [`Gesture`]s.
///
/// Only one pointer is tracked; a `Down` while a press is active restarts the sequence. Gestures
/// are delivered through the `emit` callback in the order they occur.
///
/// Long presses are time based: call [`GestureTranslator::poll`] from the host's frame loop to
/// fire one while the pointer is held still. Without polling, a long press is detected on the
/// next event after the timeout.
#[derive(Clone, Debug, Default)]
pub struct GestureTranslator {
    options: GestureOptions,
    tracker: VelocityTracker,
    press: Option<Press>,
}

impl GestureTranslator {
    pub fn new(options: GestureOptions) -> Self {
        Self {
            options,
            tracker: VelocityTracker::new(),
            press: None,
        }
    }

    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    /// When a held press would turn into a long press, if one still can.
    pub fn long_press_deadline(&self) -> Option<u64> {
        let press = self.press?;
        if press.dragging || press.wandered || press.long_pressed {
            return None;
        }
        Some(press.down_ms.saturating_add(self.options.long_press_timeout_ms))
    }

    pub fn on_pointer_event(&mut self, event: PointerEvent, mut emit: impl FnMut(Gesture)) {
        match event.phase {
            PointerPhase::Down => self.on_down(event, &mut emit),
            PointerPhase::Move => self.on_move(event, &mut emit),
            PointerPhase::Up => self.on_up(event, &mut emit),
            PointerPhase::Cancel => self.on_cancel(&mut emit),
        }
    }

    /// Fires a pending long press once `now_ms` reaches its deadline.
    pub fn poll(&mut self, now_ms: u64, mut emit: impl FnMut(Gesture)) {
        self.check_long_press(now_ms, &mut emit);
    }

    fn on_down(&mut self, event: PointerEvent, emit: &mut impl FnMut(Gesture)) {
        if self.is_dragging() {
            emit(Gesture::DragEnd);
        }
        self.tracker.reset();
        self.tracker.add(event.time_ms, event.x);
        self.press = Some(Press {
            down_x: event.x,
            down_y: event.y,
            down_ms: event.time_ms,
            last_x: event.x,
            residual: 0.0,
            dragging: false,
            wandered: false,
            long_pressed: false,
        });
        gtrace!(x = event.x, y = event.y, "pointer down");
        emit(Gesture::Down);
    }

    fn on_move(&mut self, event: PointerEvent, emit: &mut impl FnMut(Gesture)) {
        self.check_long_press(event.time_ms, emit);
        let slop = self.options.effective_touch_slop();
        let Some(press) = self.press.as_mut() else {
            return;
        };
        self.tracker.add(event.time_ms, event.x);

        if !press.wandered {
            let dx = event.x - press.down_x;
            let dy = event.y - press.down_y;
            press.wandered = dx.hypot(dy) > slop;
        }
        if press.long_pressed {
            return;
        }

        if !press.dragging {
            if (event.x - press.down_x).abs() <= slop {
                return;
            }
            press.dragging = true;
            press.wandered = true;
            gtrace!(x = event.x, "drag start");
            emit(Gesture::DragStart);
        }
        drag_to(press, event.x, emit);
    }

    fn on_up(&mut self, event: PointerEvent, emit: &mut impl FnMut(Gesture)) {
        self.check_long_press(event.time_ms, emit);
        let Some(mut press) = self.press.take() else {
            return;
        };
        self.tracker.add(event.time_ms, event.x);

        if press.dragging {
            drag_to(&mut press, event.x, emit);
            emit(Gesture::DragEnd);
            let velocity = self
                .tracker
                .velocity_with_max(self.options.max_fling_velocity);
            if velocity.abs() >= self.options.min_fling_velocity && velocity != 0.0 {
                gtrace!(velocity, "release fling");
                emit(Gesture::Fling { velocity });
            }
        } else if !press.long_pressed
            && !press.wandered
            && (event.x - press.down_x).hypot(event.y - press.down_y)
                <= self.options.effective_touch_slop()
        {
            emit(Gesture::Tap {
                x: press.down_x,
                y: press.down_y,
            });
        }
        self.tracker.reset();
    }

    fn on_cancel(&mut self, emit: &mut impl FnMut(Gesture)) {
        if let Some(press) = self.press.take() {
            if press.dragging {
                emit(Gesture::DragEnd);
            }
        }
        self.tracker.reset();
    }

    fn check_long_press(&mut self, now_ms: u64, emit: &mut impl FnMut(Gesture)) {
        let Some(deadline) = self.long_press_deadline() else {
            return;
        };
        if now_ms < deadline {
            return;
        }
        let Some(press) = self.press.as_mut() else {
            return;
        };
        press.long_pressed = true;
        gdebug!(x = press.down_x, y = press.down_y, "long press");
        emit(Gesture::LongPress {
            x: press.down_x,
            y: press.down_y,
        });
    }
}

/// Emits the integral part of the travel since the last sample, carrying the fraction.
fn drag_to(press: &mut Press, x: f32, emit: &mut impl FnMut(Gesture)) {
    let raw = press.last_x - x + press.residual;
    let whole = raw.trunc();
    press.residual = raw - whole;
    press.last_x = x;
    if whole != 0.0 {
        emit(Gesture::Drag {
            delta: whole as i64,
        });
    }
}
