//! Utilities for window handling of game engine.

/// Size of game engine window.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Creates new size of window.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if window has no visible area.
    pub const fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<[u32; 2]> for Size {
    fn from(array: [u32; 2]) -> Self {
        Self::new(array[0], array[1])
    }
}

impl From<Size> for [u32; 2] {
    fn from(size: Size) -> Self {
        [size.width, size.height]
    }
}

impl From<(u32, u32)> for Size {
    fn from(tuple: (u32, u32)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

impl From<Size> for (u32, u32) {
    fn from(size: Size) -> Self {
        (size.width, size.height)
    }
}

/// Component of the root entity which holds current size of the host window.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    pub size: Size,
}

impl Window {
    pub const fn new(size: Size) -> Self {
        Self { size }
    }
}
