//! The interface between ToaruShape and the X server.

use std::fmt::Debug;

use thiserror::Error;

use crate::corners::{Fill, Polarity, Region};
use crate::types::Size;

/// An X window ID.
pub type XWindowID = u32;

/// The result type returned by X connections.
pub type Result<T> = ::core::result::Result<T, XError>;

/// Possible errors returned by the X connection.
#[non_exhaustive]
#[derive(Debug, Error, Clone)]
pub enum XError {
    /// An error when establishing a connection with the server.
    #[error("X connection error: {0}")]
    Connection(String),

    /// An error caused by a malformed protocol request.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No screens were found on the X server.
    #[error("Could not find screens from X server")]
    NoScreens,

    /// An internal server error.
    #[error("X server error: {0}")]
    ServerError(String),

    /// The request could not be fulfilled by the X server.
    #[error("Could not complete specified request: {0}")]
    RequestError(&'static str),

    /// Some error not tracked by ToaruShape.
    #[error("{0}")]
    OtherError(String),
}

/// A scratch bitmap together with one graphics context per polarity.
///
/// This is the surface type used by both bundled connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchPixmap {
    pub pixmap: u32,
    /// Draws pixels excluded from the mask.
    pub clear: u32,
    /// Draws pixels included in the mask.
    pub opaque: u32,
}

impl ScratchPixmap {
    /// The graphics context filling with the given polarity.
    pub fn gc(&self, polarity: Polarity) -> u32 {
        match polarity {
            Polarity::Clear => self.clear,
            Polarity::Opaque => self.opaque,
        }
    }
}

/// Converts a frame size into protocol dimensions.
pub(crate) fn surface_dims(size: Size) -> Result<(u16, u16)> {
    match (u16::try_from(size.width), u16::try_from(size.height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(XError::RequestError("surface dimensions out of range")),
    }
}

/// Saturates a coordinate or angle to the protocol's `INT16`.
pub(crate) fn coord(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Saturates a width or height to the protocol's `CARD16`.
pub(crate) fn extent(v: u32) -> u16 {
    v.min(u16::MAX as u32) as u16
}

/// The shape kinds a mask can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskKind {
    /// The visible extent of the window.
    Bounding,
    /// The input-sensitive extent of the window.
    Clip,
}

/// A type that can apply shape masks to windows.
///
/// This is the sink the [shaping code][1] writes to. Implementors are
/// expected to map each method onto a single protocol request, or a
/// small fixed batch of them, and not to wait on replies except where
/// noted.
///
/// # Scratch Surfaces
///
/// A scratch surface is a 1-bit off-screen drawable the size of the
/// window being shaped, along with whatever the implementation needs
/// to fill both polarities onto it. Each surface created with
/// [`create_surface`](ShapeSink::create_surface) is destroyed exactly
/// once by the caller.
///
/// # Implementors
///
/// This crate provides two implementations: [X11RBConn][2] and
/// [XCBConn][3].
///
/// [1]: crate::shape::apply_shape
/// [2]: crate::x::x11rb::X11RBConn
/// [3]: crate::x::xcb::XCBConn
pub trait ShapeSink {
    /// A handle to a scratch surface.
    type Surface: Copy + Debug;

    /// Whether the server supports the SHAPE extension.
    fn shape_supported(&self) -> bool;

    /// Creates a scratch surface for the given window.
    fn create_surface(&self, window: XWindowID, size: Size) -> Result<Self::Surface>;

    /// Frees a scratch surface and everything allocated with it.
    fn destroy_surface(&self, surface: Self::Surface) -> Result<()>;

    /// Fills a single primitive onto a surface.
    fn fill(&self, surface: Self::Surface, fill: &Fill) -> Result<()>;

    /// Sets one of the window's masks from a surface.
    fn set_mask(&self, window: XWindowID, kind: MaskKind, surface: Self::Surface) -> Result<()>;

    /// Resets both of the window's masks, leaving it a plain rectangle.
    fn clear_mask(&self, window: XWindowID) -> Result<()>;

    /// Flushes any requests that have been queued.
    fn flush(&self) -> Result<()>;

    /// Paints a whole region onto a surface, in order.
    fn paint(&self, surface: Self::Surface, region: &Region) -> Result<()> {
        for fill in region.fills() {
            self.fill(surface, fill)?;
        }
        Ok(())
    }
}

impl<S: ShapeSink> ShapeSink for &S {
    type Surface = S::Surface;

    fn shape_supported(&self) -> bool {
        (**self).shape_supported()
    }

    fn create_surface(&self, window: XWindowID, size: Size) -> Result<Self::Surface> {
        (**self).create_surface(window, size)
    }

    fn destroy_surface(&self, surface: Self::Surface) -> Result<()> {
        (**self).destroy_surface(surface)
    }

    fn fill(&self, surface: Self::Surface, fill: &Fill) -> Result<()> {
        (**self).fill(surface, fill)
    }

    fn set_mask(&self, window: XWindowID, kind: MaskKind, surface: Self::Surface) -> Result<()> {
        (**self).set_mask(window, kind, surface)
    }

    fn clear_mask(&self, window: XWindowID) -> Result<()> {
        (**self).clear_mask(window)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_saturation() {
        assert_eq!(coord(-10), -10);
        assert_eq!(coord(i32::MIN), i16::MIN);
        assert_eq!(coord(40_000), i16::MAX);
        assert_eq!(extent(65_534), 65_534);
        assert_eq!(extent(u32::MAX), u16::MAX);
    }

    #[test]
    fn test_surface_dims() {
        assert_eq!(surface_dims(Size::new(300, 200)).unwrap(), (300, 200));
        assert!(surface_dims(Size::new(0, 200)).is_err());
        assert!(surface_dims(Size::new(70_000, 200)).is_err());
    }
}
