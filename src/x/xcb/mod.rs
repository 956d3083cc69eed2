//! Implementation of `ShapeSink` backed by the `xcb` library.
//!
//! This module provides an interface to the X11 protocol via the XCB
//! backend.
//!
//! The core of this module is `XCBConn`, a type that implements the
//! `ShapeSink` trait and can thus be used to shape window frames.
use core::marker::PhantomData;

use tracing::{debug, trace};

use xcb::shape;
use xcb::x;
use xcb::{Xid as XCBid, XidNew};

use super::{
    core::{surface_dims, MaskKind, Result, ScratchPixmap, ShapeSink, XError, XWindowID},
    ConnStatus, Initialized, Uninitialized,
};
use crate::corners::{Fill, Polarity, Primitive};
use crate::types::Size;

mod convert;
mod util;

use util::{cast, id, req_and_check, req_and_reply};

/// A connection to an X server, backed by the XCB library.
///
/// This is a very simple connection to the X server
/// and is completely synchronous, despite the async capabilities
/// of the underlying xcb library.
///
/// It implements [ShapeSink][1] and thus can be used with a
/// [Shaper][2].
///
/// # Usage
///
/// ```no_run
/// use toarushape::x::xcb::XCBConn;
///
/// let conn = XCBConn::connect().expect("Connection error");
/// let conn = conn.init().expect("Could not initialize");
///
/// /* or: */
/// let conn = XCBConn::new().expect("Connection error");
/// ```
///
/// [1]: crate::x::ShapeSink
/// [2]: crate::shape::Shaper
pub struct XCBConn<S: ConnStatus> {
    conn: xcb::Connection,
    root: XWindowID,
    idx: i32,
    shape_version: Option<(u32, u32)>,
    _marker: PhantomData<S>,
}

impl XCBConn<Uninitialized> {
    /// Connect to the X server and allocate a new Connection.
    ///
    /// SHAPE is requested as an optional extension, so connecting
    /// still succeeds on a server without it.
    pub fn connect() -> Result<Self> {
        let (conn, idx) =
            xcb::Connection::connect_with_extensions(None, &[], &[xcb::Extension::Shape])?;
        debug!("Connected to x server, got preferred screen {}", idx);

        Ok(Self {
            conn,
            root: 0,
            idx,
            shape_version: None,
            _marker: PhantomData,
        })
    }

    /// Initializes the connection.
    ///
    /// It does the following:
    ///
    /// - Looks up the root window of the preferred screen.
    /// - Checks whether the SHAPE extension is present, and
    ///   if so, which version the server speaks.
    #[must_use = "this consumes the connection and returns an initialized one"]
    pub fn init(self) -> Result<XCBConn<Initialized>> {
        let root = match self.conn.get_setup().roots().nth(self.idx as usize) {
            Some(screen) => id!(screen.root()),
            None => return Err(XError::NoScreens),
        };
        debug!("Got root: {}", root);

        let present = req_and_reply!(
            self.conn,
            &x::QueryExtension {
                name: "SHAPE".as_bytes()
            }
        )?
        .present();

        let shape_version = if present {
            let res = req_and_reply!(self.conn, &shape::QueryVersion {})?;
            let (maj, min) = (res.major_version() as u32, res.minor_version() as u32);
            debug!("Got shape version {}.{}", maj, min);
            Some((maj, min))
        } else {
            debug!("SHAPE extension not present");
            None
        };

        Ok(XCBConn {
            conn: self.conn,
            root,
            idx: self.idx,
            shape_version,
            _marker: PhantomData,
        })
    }
}

impl XCBConn<Initialized> {
    /// Shortcut static method for directly creating
    /// an initialized connection.
    pub fn new() -> Result<Self> {
        XCBConn::connect()?.init()
    }

    /// Exposes `XCBConn`'s internal connection.
    pub fn conn(&self) -> &xcb::Connection {
        &self.conn
    }

    /// The root window of the screen this connection manages.
    pub fn root(&self) -> XWindowID {
        self.root
    }

    /// The version of the SHAPE extension, if present.
    pub fn shape_version(&self) -> Option<(u32, u32)> {
        self.shape_version
    }

    fn create_gc(&self, pixmap: x::Pixmap, polarity: Polarity) -> Result<x::Gcontext> {
        let gc: x::Gcontext = self.conn.generate_id();
        req_and_check!(
            self.conn,
            &x::CreateGc {
                cid: gc,
                drawable: x::Drawable::Pixmap(pixmap),
                value_list: &[x::Gc::Foreground(polarity.pixel())],
            }
        )?;
        Ok(gc)
    }

    fn mask_kind(kind: MaskKind) -> shape::Sk {
        match kind {
            MaskKind::Bounding => shape::Sk::Bounding,
            MaskKind::Clip => shape::Sk::Clip,
        }
    }

    fn send_mask(&self, window: XWindowID, kind: MaskKind, pixmap: x::Pixmap) {
        self.conn.send_request(&shape::Mask {
            operation: shape::So::Set,
            destination_kind: Self::mask_kind(kind),
            destination_window: cast!(x::Window, window),
            x_offset: 0,
            y_offset: 0,
            source_bitmap: pixmap,
        });
    }
}

impl ShapeSink for XCBConn<Initialized> {
    type Surface = ScratchPixmap;

    fn shape_supported(&self) -> bool {
        self.shape_version.is_some()
    }

    fn create_surface(&self, window: XWindowID, size: Size) -> Result<ScratchPixmap> {
        let (width, height) = surface_dims(size)?;
        trace!("creating {}x{} scratch pixmap for {}", width, height, window);

        let pixmap: x::Pixmap = self.conn.generate_id();
        req_and_check!(
            self.conn,
            &x::CreatePixmap {
                depth: 1,
                pid: pixmap,
                drawable: x::Drawable::Window(cast!(x::Window, window)),
                width,
                height,
            }
        )?;

        let gcs = self
            .create_gc(pixmap, Polarity::Clear)
            .and_then(|clear| match self.create_gc(pixmap, Polarity::Opaque) {
                Ok(opaque) => Ok((clear, opaque)),
                Err(e) => {
                    self.conn.send_request(&x::FreeGc { gc: clear });
                    Err(e)
                }
            });

        match gcs {
            Ok((clear, opaque)) => Ok(ScratchPixmap {
                pixmap: id!(pixmap),
                clear: id!(clear),
                opaque: id!(opaque),
            }),
            Err(e) => {
                self.conn.send_request(&x::FreePixmap { pixmap });
                Err(e)
            }
        }
    }

    fn destroy_surface(&self, surface: ScratchPixmap) -> Result<()> {
        trace!("freeing scratch pixmap {}", surface.pixmap);

        self.conn.send_request(&x::FreeGc {
            gc: cast!(x::Gcontext, surface.clear),
        });
        self.conn.send_request(&x::FreeGc {
            gc: cast!(x::Gcontext, surface.opaque),
        });
        self.conn.send_request(&x::FreePixmap {
            pixmap: cast!(x::Pixmap, surface.pixmap),
        });
        self.conn.flush()?;

        Ok(())
    }

    fn fill(&self, surface: ScratchPixmap, fill: &Fill) -> Result<()> {
        let drawable = x::Drawable::Pixmap(cast!(x::Pixmap, surface.pixmap));
        let gc = cast!(x::Gcontext, surface.gc(fill.polarity));

        match &fill.primitive {
            Primitive::Rectangle(rect) => {
                self.conn.send_request(&x::PolyFillRectangle {
                    drawable,
                    gc,
                    rectangles: &[x::Rectangle::from(*rect)],
                });
            }
            Primitive::Arc(arc) => {
                self.conn.send_request(&x::PolyFillArc {
                    drawable,
                    gc,
                    arcs: &[x::Arc::from(*arc)],
                });
            }
            Primitive::Polygon(poly) => {
                let points: Vec<x::Point> =
                    poly.points().iter().map(|pt| x::Point::from(*pt)).collect();
                self.conn.send_request(&x::FillPoly {
                    drawable,
                    gc,
                    shape: x::PolyShape::Nonconvex,
                    coordinate_mode: x::CoordMode::Origin,
                    points: &points,
                });
            }
        }

        Ok(())
    }

    fn set_mask(&self, window: XWindowID, kind: MaskKind, surface: ScratchPixmap) -> Result<()> {
        trace!("setting {:?} mask of {} to {}", kind, window, surface.pixmap);

        req_and_check!(
            self.conn,
            &shape::Mask {
                operation: shape::So::Set,
                destination_kind: Self::mask_kind(kind),
                destination_window: cast!(x::Window, window),
                x_offset: 0,
                y_offset: 0,
                source_bitmap: cast!(x::Pixmap, surface.pixmap),
            }
        )?;

        Ok(())
    }

    fn clear_mask(&self, window: XWindowID) -> Result<()> {
        trace!("clearing masks of {}", window);

        for kind in [MaskKind::Bounding, MaskKind::Clip] {
            self.send_mask(window, kind, x::Pixmap::none());
        }
        self.conn.flush()?;

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}

impl From<xcb::ConnError> for XError {
    fn from(e: xcb::ConnError) -> XError {
        XError::Connection(e.to_string())
    }
}

impl From<xcb::ProtocolError> for XError {
    fn from(e: xcb::ProtocolError) -> XError {
        XError::Protocol(e.to_string())
    }
}

impl From<xcb::Error> for XError {
    fn from(e: xcb::Error) -> XError {
        match e {
            xcb::Error::Connection(e) => e.into(),
            xcb::Error::Protocol(e) => e.into(),
        }
    }
}
