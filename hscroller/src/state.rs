use crate::ScrollPhase;

/// A lightweight, serializable snapshot of the materialized window.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSnapshot {
    pub left_index: isize,
    pub right_index: usize,
    pub display_offset: i64,
    pub len: usize,
}

/// A lightweight, serializable snapshot of the scroll state.
///
/// `max_offset` is `None` while the last item has not been measured yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    pub offset: i64,
    pub max_offset: Option<i64>,
    pub phase: ScrollPhase,
}

/// A combined snapshot of window + scroll state.
///
/// Useful for restoring a list across frames or sessions without coupling the engine to any
/// specific UI framework. Only the scroll part can be restored; the window is rebuilt from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub window: WindowSnapshot,
    pub scroll: ScrollSnapshot,
}
