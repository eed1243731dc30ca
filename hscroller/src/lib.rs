//! A headless engine for horizontally scrolling lists.
//!
//! For pointer gesture translation and item click callbacks, see the `hscroller-gesture` crate.
//!
//! The engine keeps a sliding window of materialized items over an arbitrarily long sequence:
//! as the scroll offset moves, items that leave the viewport are detached into a shared
//! [`RecyclingPool`] and items that enter it are built by the host's [`ItemAdapter`], reusing a
//! pooled surface when one is available. The full item range is never materialized and item
//! widths are only known once an item has been built, so the maximum scroll offset is discovered
//! the first time the last item comes into view.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - an [`ItemAdapter`] that builds and measures item surfaces
//! - the viewport size
//! - a [`LayoutScheduler`] and a render loop that calls [`HorizontalList::layout_pass`]
//! - scroll input (drags and flings)
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod adapter;
mod fill;
mod list;
mod options;
mod pool;
mod scroll;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use adapter::{DataSetObservable, DataSetObserver, ItemAdapter, LayoutScheduler};
pub use fill::{FillEngine, FillReport};
pub use list::HorizontalList;
pub use options::ListOptions;
pub use pool::RecyclingPool;
pub use scroll::{FlingTrajectory, ScrollController};
pub use state::{FrameState, ScrollSnapshot, WindowSnapshot};
pub use types::{Measured, ScrollPhase, Viewport};
pub use window::{Item, WindowState};
