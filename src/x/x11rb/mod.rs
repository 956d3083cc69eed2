use core::marker::PhantomData;

use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors;
use x11rb::protocol::{
    shape::{self, ConnectionExt as ShapeConnectionExt},
    xproto::{self, ConnectionExt as XConnectionExt, CreateGCAux},
};
use x11rb::rust_connection::RustConnection;

use tracing::{debug, trace};

use super::{
    core::{surface_dims, MaskKind, Result, ScratchPixmap, ShapeSink, XError, XWindowID},
    ConnStatus, Initialized, Uninitialized,
};
use crate::corners::{Fill, Polarity, Primitive};
use crate::types::Size;

mod convert;

/// A connection to an X server, backed by the x11rb library.
///
/// This is a very simple connection to the X server
/// and is completely synchronous, despite the async capabilities
/// of the underlying library.
///
/// It implements [ShapeSink][1] and thus can be used with a
/// [Shaper][2].
///
/// # Usage
///
/// ```no_run
/// use toarushape::x::x11rb::X11RBConn;
///
/// let conn = X11RBConn::connect().expect("Connection error");
/// let conn = conn.init().expect("Could not initialize");
///
/// /* or: */
/// let conn = X11RBConn::new().expect("Connection error");
/// ```
///
/// [1]: crate::x::ShapeSink
/// [2]: crate::shape::Shaper
pub struct X11RBConn<S: ConnStatus> {
    conn: RustConnection,
    root: XWindowID,
    idx: usize,
    shape_version: Option<(u32, u32)>,
    _marker: PhantomData<S>,
}

impl X11RBConn<Uninitialized> {
    /// Connect to the X server and allocate a new Connection.
    pub fn connect() -> Result<Self> {
        let (conn, idx) = x11rb::connect(None)?;
        trace!("Connected to x server, got preferred screen {}", idx);

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
    pub fn init(self) -> Result<X11RBConn<Initialized>> {
        let root = match self.conn.setup().roots.get(self.idx) {
            Some(screen) => screen.root,
            None => return Err(XError::NoScreens),
        };
        trace!("Got root: {}", root);

        let shape_version = if self
            .conn
            .extension_information(shape::X11_EXTENSION_NAME)?
            .is_some()
        {
            let res = self.conn.shape_query_version()?.reply()?;
            let (maj, min) = (res.major_version as u32, res.minor_version as u32);
            debug!("Got shape version {}.{}", maj, min);
            Some((maj, min))
        } else {
            debug!("SHAPE extension not present");
            None
        };

        Ok(X11RBConn {
            conn: self.conn,
            root,
            idx: self.idx,
            shape_version,
            _marker: PhantomData,
        })
    }
}

impl X11RBConn<Initialized> {
    /// Shortcut static method for directly creating
    /// an initialized connection.
    pub fn new() -> Result<Self> {
        X11RBConn::connect()?.init()
    }

    /// Exposes `X11RBConn`'s internal connection.
    pub fn conn(&self) -> &RustConnection {
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

    fn create_gc(&self, pixmap: u32, polarity: Polarity) -> Result<u32> {
        let gc = self.conn.generate_id()?;
        self.conn
            .create_gc(gc, pixmap, &CreateGCAux::new().foreground(polarity.pixel()))?
            .check()?;
        Ok(gc)
    }

    fn mask_kind(kind: MaskKind) -> shape::SK {
        match kind {
            MaskKind::Bounding => shape::SK::BOUNDING,
            MaskKind::Clip => shape::SK::CLIP,
        }
    }
}

impl ShapeSink for X11RBConn<Initialized> {
    type Surface = ScratchPixmap;

    fn shape_supported(&self) -> bool {
        self.shape_version.is_some()
    }

    fn create_surface(&self, window: XWindowID, size: Size) -> Result<ScratchPixmap> {
        let (width, height) = surface_dims(size)?;
        trace!("creating {}x{} scratch pixmap for {}", width, height, window);

        let pixmap = self.conn.generate_id()?;
        self.conn
            .create_pixmap(1, pixmap, window, width, height)?
            .check()?;

        let gcs = self
            .create_gc(pixmap, Polarity::Clear)
            .and_then(|clear| match self.create_gc(pixmap, Polarity::Opaque) {
                Ok(opaque) => Ok((clear, opaque)),
                Err(e) => {
                    self.conn.free_gc(clear)?;
                    Err(e)
                }
            });

        match gcs {
            Ok((clear, opaque)) => Ok(ScratchPixmap {
                pixmap,
                clear,
                opaque,
            }),
            Err(e) => {
                self.conn.free_pixmap(pixmap)?;
                Err(e)
            }
        }
    }

    fn destroy_surface(&self, surface: ScratchPixmap) -> Result<()> {
        trace!("freeing scratch pixmap {}", surface.pixmap);

        self.conn.free_gc(surface.clear)?;
        self.conn.free_gc(surface.opaque)?;
        self.conn.free_pixmap(surface.pixmap)?;
        self.conn.flush()?;

        Ok(())
    }

    fn fill(&self, surface: ScratchPixmap, fill: &Fill) -> Result<()> {
        let (drawable, gc) = (surface.pixmap, surface.gc(fill.polarity));

        match &fill.primitive {
            Primitive::Rectangle(rect) => {
                self.conn
                    .poly_fill_rectangle(drawable, gc, &[xproto::Rectangle::from(*rect)])?;
            }
            Primitive::Arc(arc) => {
                self.conn.poly_fill_arc(drawable, gc, &[xproto::Arc::from(*arc)])?;
            }
            Primitive::Polygon(poly) => {
                let points: Vec<xproto::Point> =
                    poly.points().iter().map(|pt| xproto::Point::from(*pt)).collect();
                self.conn.fill_poly(
                    drawable,
                    gc,
                    xproto::PolyShape::NONCONVEX,
                    xproto::CoordMode::ORIGIN,
                    &points,
                )?;
            }
        }

        Ok(())
    }

    fn set_mask(&self, window: XWindowID, kind: MaskKind, surface: ScratchPixmap) -> Result<()> {
        trace!("setting {:?} mask of {} to {}", kind, window, surface.pixmap);

        self.conn
            .shape_mask(
                shape::SO::SET,
                Self::mask_kind(kind),
                window,
                0,
                0,
                surface.pixmap,
            )?
            .check()?;

        Ok(())
    }

    fn clear_mask(&self, window: XWindowID) -> Result<()> {
        trace!("clearing masks of {}", window);

        for kind in [MaskKind::Bounding, MaskKind::Clip] {
            self.conn
                .shape_mask(shape::SO::SET, Self::mask_kind(kind), window, 0, 0, x11rb::NONE)?;
        }
        self.conn.flush()?;

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}

impl From<errors::ConnectionError> for XError {
    fn from(e: errors::ConnectionError) -> XError {
        use errors::ConnectionError::*;
        match e {
            UnknownError | InsufficientMemory | FdPassingFailed => {
                XError::Connection(e.to_string())
            }
            IoError(e) => XError::Connection(e.to_string()),
            other => XError::Protocol(other.to_string()),
        }
    }
}

impl From<errors::ConnectError> for XError {
    fn from(e: errors::ConnectError) -> XError {
        XError::Connection(e.to_string())
    }
}

impl From<errors::ReplyError> for XError {
    fn from(e: errors::ReplyError) -> XError {
        XError::Protocol(e.to_string())
    }
}

impl From<errors::ReplyOrIdError> for XError {
    fn from(e: errors::ReplyOrIdError) -> XError {
        if let errors::ReplyOrIdError::ConnectionError(e) = e {
            e.into()
        } else {
            XError::ServerError(e.to_string())
        }
    }
}
