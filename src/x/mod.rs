//! Types and traits providing an interface to the X server.
//!
//! The core of this module is the [`ShapeSink`] trait, which defines
//! the requests ToaruShape needs in order to shape a window: creating
//! and filling a scratch bitmap, and applying it as the window's
//! bounding and clip masks through the SHAPE extension.
//!
//! For concrete implementations of the trait, this module offers two
//! submodules which each contain implementations using the XCB and
//! X11RB backing libraries respectively.
//!
//! ## Connection Object Initialization
//!
//! The two `ShapeSink` implementors have two states: uninitialized,
//! and initialized, marked in their type constructor. Uninitialized
//! connections have only established a connection to the server.
//! Initialization queries the SHAPE extension and the root screen,
//! and `ShapeSink` is only implemented for initialized connections.

pub mod core;

/// Implementation of `ShapeSink` backed by the `x11rb` library.
pub mod x11rb;
/// Implementation of `ShapeSink` backed by the `xcb` library.
pub mod xcb;

#[doc(inline)]
pub use self::core::{MaskKind, Result, ShapeSink, XError, XWindowID};

#[doc(inline)]
pub use self::x11rb::X11RBConn;
#[doc(inline)]
pub use self::xcb::XCBConn;
#[doc(inline)]
pub use status::ConnStatus;
pub use status::{Initialized, Uninitialized};

/* since connection implementations can only be tested
on a system with an X server running, disable this
unless we specifically enable the `protocol` cfg flag
which should only be be used if testing locally */

/* the dummy connection does not talk to an actual
X server, so keep it enabled for standard testing */
#[cfg(test)]
pub(crate) mod dummy;

pub mod status {
    //! Types for representing connection status.
    //!
    //! This module contains the [`ConnStatus`] sealed trait,
    //! as well as its two implementors, [`Initialized`] and
    //! [`Uninitialized`]. These are used to mark the state of
    //! the two connection objects, and act as guards to only
    //! expose [`ShapeSink`](crate::x::ShapeSink) methods when safe
    //! to do so.
    mod private {
        pub trait Sealed {}
    }

    /// A trait defining marker types `Unitialized` and `Initialized`.
    pub trait ConnStatus: private::Sealed {}

    /// A marker struct indicating a connection is uninitialized.
    ///
    /// Uninitialized connections do not expose any methods.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Uninitialized;

    impl ConnStatus for Uninitialized {}
    impl private::Sealed for Uninitialized {}

    /// A marker type indicating a connection is initialized and can be used.
    ///
    /// Initialized connections expose all available methods.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Initialized;

    impl ConnStatus for Initialized {}
    impl private::Sealed for Initialized {}
}
