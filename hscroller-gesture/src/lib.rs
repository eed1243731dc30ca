//! Pointer gesture handling for the `hscroller` crate.
//!
//! The `hscroller` crate is UI-agnostic and only understands drags, flings and layout passes.
//! This crate turns raw pointer samples into those calls:
//!
//! - [`GestureTranslator`]: pointer events to [`Gesture`]s (drag, fling, tap, long press)
//! - [`VelocityTracker`]: release velocity estimation
//! - [`ListController`]: owns a list, applies gestures to it and reports item clicks
//!
//! This crate is framework-agnostic; hosts feed it events from whatever toolkit they use.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod options;
mod translator;
mod velocity;


pub use controller::{ItemCallback, ListController};
pub use options::GestureOptions;
pub use translator::{Gesture, GestureTranslator, PointerEvent, PointerPhase};
pub use velocity::VelocityTracker;
