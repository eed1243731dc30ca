/// Size of the viewport the list renders into, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A surface returned by the adapter together with its measured size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measured<S> {
    pub surface: S,
    pub width: u32,
    pub height: u32,
}

impl<S> Measured<S> {
    pub fn new(surface: S, width: u32, height: u32) -> Self {
        Self {
            surface,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    Dragging,
    Flinging,
}
