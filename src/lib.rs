//! Corner masks for tiled window frames.
//!
//! ToaruShape computes the region a frame should occupy once its
//! corners are styled, and applies it to the frame's window through
//! the X11 SHAPE extension.
//!
//! The work is split into pure geometry in [`corners`], which has no
//! notion of a display server, and the X side in [`x`], which turns
//! a computed [`Region`](corners::Region) into protocol requests.
//! [`apply_shape`] and [`Shaper`] tie the two together.

pub mod config;
pub mod core;
pub mod corners;
pub mod shape;
pub mod x;

mod log;

pub use crate::config::{CornerConfig, ToaruCornerConfig};
pub use crate::core::types;
pub use crate::core::types::{Result, ToaruError};
pub use crate::log::{DefaultErrorHandler, ErrorHandler};
pub use crate::shape::{apply_shape, ShapeOutcome, Shaper};
pub use crate::x::core::Result as XResult;

use crate::x::{x11rb::X11RBConn, xcb::XCBConn, Initialized};

/// A Shaper backed by an initialized XCB connection.
pub type XCBShaper<C> = Shaper<XCBConn<Initialized>, C>;
/// A Shaper backed by an initialized X11RB connection.
pub type X11RBShaper<C> = Shaper<X11RBConn<Initialized>, C>;

/// Convenience function for creating a XCB-backed Shaper.
pub fn xcb_backed_shaper<C: CornerConfig>(config: C) -> XResult<XCBShaper<C>> {
    let conn = XCBConn::connect()?.init()?;

    Ok(Shaper::new(conn, config))
}

/// Convenience function for creating a X11RB-backed Shaper.
pub fn x11rb_backed_shaper<C: CornerConfig>(config: C) -> XResult<X11RBShaper<C>> {
    let conn = X11RBConn::connect()?.init()?;

    Ok(Shaper::new(conn, config))
}
