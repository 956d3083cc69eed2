use thiserror::Error;

use crate::config::ConfigError;
use crate::x::XError;

pub use crate::core::container::{Container, ContainerKind, Frame, Layout};

pub type Result<T> = ::core::result::Result<T, ToaruError>;

/// The top-level error type for ToaruShape.
#[derive(Debug, Error, Clone)]
pub enum ToaruError {
    /// An error returned by the X server or the connection to it.
    #[error(transparent)]
    X(#[from] XError),
    /// An invalid corner configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A point in a frame-relative coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Reflects the point about the horizontal centre line
    /// of a surface `height` pixels tall.
    pub const fn mirror_y(self, height: u32) -> Self {
        Self {
            x: self.x,
            y: height as i32 - self.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from(from: (i32, i32)) -> Self {
        Self::new(from.0, from.1)
    }
}

/// The dimensions of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn zeroed() -> Self {
        Self::new(0, 0)
    }

    /// The length of the shorter side.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Whether a corner of `size` pixels on every corner
    /// still fits without the corners overlapping.
    pub fn fits_corner(&self, size: u32) -> bool {
        size.saturating_mul(2) <= self.min_side()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from(from: (u32, u32)) -> Self {
        Self::new(from.0, from.1)
    }
}
