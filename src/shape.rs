//! Applying corner masks to frames.
//!
//! [`apply_shape`] is the single entry point that turns a frame and a
//! corner style into requests on a [`ShapeSink`]. [`Shaper`] wraps it
//! with a sink, a [`CornerConfig`] to resolve styles from, and an
//! [`ErrorHandler`] for failures, and is what a window manager would
//! call from its reshape events.

use tracing::{debug, error, instrument, trace, warn};

use crate::config::CornerConfig;
use crate::corners::{classify, compose, CornerStyle, EdgeSelector};
use crate::log::{DefaultErrorHandler, ErrorHandler};
use crate::types::{ContainerKind, Frame, Size};
use crate::x::{MaskKind, Result as XResult, ShapeSink, XWindowID};

/// The branch [`apply_shape`] took for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeOutcome {
    /// The server has no SHAPE extension, nothing was done.
    Unsupported,
    /// The frame is never shaped, either because it sits in a dock
    /// area or because it has no area.
    Skipped,
    /// The frame is fullscreen and its masks were reset.
    Cleared,
    /// A mask was applied, decorating the given edges.
    Shaped(EdgeSelector),
}

/// A scratch surface that is destroyed when dropped.
struct Scratch<'a, S: ShapeSink> {
    sink: &'a S,
    surface: S::Surface,
}

impl<'a, S: ShapeSink> Scratch<'a, S> {
    fn acquire(sink: &'a S, window: XWindowID, size: Size) -> XResult<Self> {
        let surface = sink.create_surface(window, size)?;
        trace!("acquired scratch surface {:?}", surface);
        Ok(Self { sink, surface })
    }
}

impl<S: ShapeSink> Drop for Scratch<'_, S> {
    fn drop(&mut self) {
        trace!("releasing scratch surface {:?}", self.surface);
        if let Err(e) = self.sink.destroy_surface(self.surface) {
            error!("could not release scratch surface {:?}: {}", self.surface, e);
        }
    }
}

/// Applies the corner mask for `style` to a frame.
///
/// Frames are left alone when the server lacks the SHAPE extension or
/// the frame sits in a dock area. Fullscreen frames have their masks
/// reset to a plain rectangle. Every other frame gets a scratch surface,
/// is classified, and has its region composed and painted onto that
/// surface, which is then applied as both its bounding and clip mask.
///
/// A corner size too large for the frame is logged and shaped anyway.
///
/// The scratch surface is released on every path, including when a
/// request fails. Failures are returned as-is and never retried.
#[instrument(level = "debug", skip(sink, frame), fields(window = frame.window()))]
pub fn apply_shape<S: ShapeSink>(
    sink: &S,
    frame: &Frame,
    style: CornerStyle,
) -> XResult<ShapeOutcome> {
    if !sink.shape_supported() {
        debug!("shape extension not present, not shaping");
        return Ok(ShapeOutcome::Unsupported);
    }

    if frame.container_kind() == ContainerKind::DockArea {
        debug!("frame is in a dock area, not shaping");
        return Ok(ShapeOutcome::Skipped);
    }

    if frame.is_fullscreen() {
        debug!("frame is fullscreen, clearing mask");
        sink.clear_mask(frame.window())?;
        return Ok(ShapeOutcome::Cleared);
    }

    let size = frame.size();
    if size.is_empty() {
        debug!("frame has no area, not shaping");
        return Ok(ShapeOutcome::Skipped);
    }

    if !size.fits_corner(style.size) {
        warn!(
            "corner size {} is too large for a {}x{} frame",
            style.size, size.width, size.height
        );
    }

    let scratch = Scratch::acquire(sink, frame.window(), size)?;

    let selector = classify(frame);
    debug!("decorating {} edge(s) with {:?}", selector, style);

    let region = compose(size, style, selector);

    sink.paint(scratch.surface, &region)?;
    for kind in [MaskKind::Bounding, MaskKind::Clip] {
        sink.set_mask(frame.window(), kind, scratch.surface)?;
    }
    sink.flush()?;

    Ok(ShapeOutcome::Shaped(selector))
}

/// Shapes frames using a sink and a corner configuration.
///
/// # Example
///
/// ```no_run
/// use toarushape::corners::{CornerShape, CornerStyle};
/// use toarushape::types::{Container, Frame, Size};
/// use toarushape::x::X11RBConn;
/// use toarushape::Shaper;
///
/// let conn = X11RBConn::new().expect("could not connect");
/// let shaper = Shaper::new(conn, CornerStyle::new(CornerShape::Rounded, 8));
///
/// let frame = Frame::new(0x1a00003, Size::new(640, 480))
///     .within(Container::workspace("1"));
///
/// shaper.reshape(&frame);
/// ```
pub struct Shaper<S, C, E = DefaultErrorHandler>
where
    S: ShapeSink,
    C: CornerConfig,
    E: ErrorHandler,
{
    sink: S,
    config: C,
    handler: E,
}

impl<S, C> Shaper<S, C, DefaultErrorHandler>
where
    S: ShapeSink,
    C: CornerConfig,
{
    /// Creates a new Shaper that logs its errors.
    pub fn new(sink: S, config: C) -> Self {
        Self::with_handler(sink, config, DefaultErrorHandler)
    }
}

impl<S, C, E> Shaper<S, C, E>
where
    S: ShapeSink,
    C: CornerConfig,
    E: ErrorHandler,
{
    /// Creates a new Shaper with a custom error handler.
    pub fn with_handler(sink: S, config: C, handler: E) -> Self {
        Self {
            sink,
            config,
            handler,
        }
    }

    /// The corner style a frame resolves to.
    pub fn style_for(&self, frame: &Frame) -> CornerStyle {
        self.config.corner_style(frame.workspace_name())
    }

    /// Reshapes a frame, as on creation, resize, layout change
    /// or a fullscreen toggle.
    ///
    /// Errors go to the error handler and `None` is returned;
    /// the frame keeps its previous shape until the next reshape.
    #[instrument(level = "debug", skip(self, frame), fields(window = frame.window()))]
    pub fn reshape(&self, frame: &Frame) -> Option<ShapeOutcome> {
        let style = self.style_for(frame);

        match apply_shape(&self.sink, frame, style) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.handler.call(frame, e.into());
                None
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut C {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use test_log::test;

    use super::*;
    use crate::config::ToaruCornerConfig;
    use crate::corners::{CornerShape, Fill, Polarity};
    use crate::types::{Container, Layout, ToaruError};
    use crate::x::dummy::{DummyConn, Request};
    use crate::x::XError;

    const ROUNDED: CornerStyle = CornerStyle::new(CornerShape::Rounded, 10);

    fn tiled() -> Frame {
        Frame::new(7, Size::new(300, 200))
            .within(Container::split(Layout::SplitH))
            .within(Container::workspace("1"))
    }

    fn tabbed() -> Frame {
        Frame::new(8, Size::new(300, 200))
            .within(Container::split(Layout::Tabbed))
            .within(Container::split(Layout::SplitV))
            .within(Container::workspace("1"))
    }

    fn fills(requests: &[Request]) -> Vec<Fill> {
        requests
            .iter()
            .filter_map(|r| match r {
                Request::Fill(_, fill) => Some(fill.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_shape_request_order() {
        let conn = DummyConn::new();
        let frame = tiled();

        let outcome = apply_shape(&conn, &frame, ROUNDED).unwrap();
        assert_eq!(outcome, ShapeOutcome::Shaped(EdgeSelector::Both));

        let requests = conn.requests();
        let region = compose(frame.size(), ROUNDED, EdgeSelector::Both);

        assert_eq!(
            requests.first(),
            Some(&Request::CreateSurface {
                window: 7,
                size: Size::new(300, 200),
                surface: 1
            })
        );
        assert_eq!(fills(&requests), region.fills());

        let n = requests.len();
        assert_eq!(
            requests[n - 4..],
            [
                Request::SetMask(7, MaskKind::Bounding, 1),
                Request::SetMask(7, MaskKind::Clip, 1),
                Request::Flush,
                Request::DestroySurface(1),
            ]
        );
    }

    #[test]
    fn test_oversized_corners_still_shaped() {
        let conn = DummyConn::new();
        let frame = Frame::new(5, Size::new(20, 20)).within(Container::workspace("1"));
        let style = CornerStyle::new(CornerShape::Rounded, 15);

        let outcome = apply_shape(&conn, &frame, style).unwrap();

        assert_eq!(outcome, ShapeOutcome::Shaped(EdgeSelector::Both));
        assert_eq!(fills(&conn.requests()), compose(frame.size(), style, EdgeSelector::Both).fills());
        assert_eq!(fills(&conn.requests()).len(), 6);
    }

    #[test]
    fn test_huge_corners_do_not_panic() {
        for style in [
            CornerStyle::new(CornerShape::Rounded, 3_000_000_000),
            CornerStyle::new(CornerShape::Default, 1 << 31),
            CornerStyle::new(CornerShape::Triangular, u32::MAX),
        ] {
            let conn = DummyConn::new();

            let outcome = apply_shape(&conn, &tiled(), style).unwrap();

            assert_eq!(outcome, ShapeOutcome::Shaped(EdgeSelector::Both));
            assert_eq!(conn.count(|r| matches!(r, Request::DestroySurface(_))), 1);
        }
    }

    #[test]
    fn test_fullscreen_clears() {
        for shape in [CornerShape::Rounded, CornerShape::Trimmed] {
            let conn = DummyConn::new();
            let frame = tiled().fullscreen(true);

            let outcome = apply_shape(&conn, &frame, CornerStyle::new(shape, 12)).unwrap();

            assert_eq!(outcome, ShapeOutcome::Cleared);
            assert_eq!(conn.requests(), vec![Request::ClearMask(7)]);
            assert_eq!(conn.count(|r| matches!(r, Request::CreateSurface { .. })), 0);
        }
    }

    #[test]
    fn test_unsupported_and_dock() {
        let conn = DummyConn::without_shape();
        assert_eq!(
            apply_shape(&conn, &tiled().fullscreen(true), ROUNDED).unwrap(),
            ShapeOutcome::Unsupported
        );
        assert!(conn.requests().is_empty());

        let conn = DummyConn::new();
        let docked = Frame::new(9, Size::new(1920, 24))
            .within(Container::dock_area())
            .within(Container::workspace("1"));
        assert_eq!(apply_shape(&conn, &docked, ROUNDED).unwrap(), ShapeOutcome::Skipped);
        assert!(conn.requests().is_empty());
    }

    #[test]
    fn test_empty_frame_skipped() {
        let conn = DummyConn::new();
        let frame = Frame::new(3, Size::new(0, 200)).within(Container::workspace("1"));

        assert_eq!(apply_shape(&conn, &frame, ROUNDED).unwrap(), ShapeOutcome::Skipped);
        assert!(conn.requests().is_empty());
    }

    #[test]
    fn test_tabbed_frame_bottom_only() {
        let conn = DummyConn::new();

        let outcome = apply_shape(&conn, &tabbed(), ROUNDED).unwrap();
        assert_eq!(outcome, ShapeOutcome::Shaped(EdgeSelector::Bottom));
    }

    #[test]
    fn test_zero_size_applies_plain_mask() {
        let conn = DummyConn::new();

        apply_shape(&conn, &tiled(), CornerStyle::new(CornerShape::Triangular, 0)).unwrap();

        let fills = fills(&conn.requests());
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].polarity, Polarity::Opaque);
    }

    #[test]
    fn test_surface_released_on_failure() {
        let conn = DummyConn::new();
        conn.fail_mask(true);

        let res = apply_shape(&conn, &tiled(), ROUNDED);
        assert!(matches!(res, Err(XError::Protocol(_))));

        assert_eq!(conn.requests().last(), Some(&Request::DestroySurface(1)));
        assert_eq!(conn.count(|r| matches!(r, Request::DestroySurface(_))), 1);
    }

    #[test]
    fn test_failed_creation_releases_nothing() {
        let conn = DummyConn::new();
        conn.fail_create(true);

        assert!(apply_shape(&conn, &tiled(), ROUNDED).is_err());
        assert!(conn.requests().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let conn = DummyConn::new();
        let frame = tabbed();
        let style = CornerStyle::new(CornerShape::Trimmed, 5);

        apply_shape(&conn, &frame, style).unwrap();
        let first = fills(&conn.take_requests());
        apply_shape(&conn, &frame, style).unwrap();
        let second = fills(&conn.take_requests());

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_shaper_resolves_workspace_style() {
        let config = ToaruCornerConfig::builder()
            .corners(ROUNDED)
            .workspace("2", CornerStyle::new(CornerShape::Default, 0))
            .finish()
            .unwrap();
        let shaper = Shaper::new(DummyConn::new(), config);

        let on_two = Frame::new(4, Size::new(300, 200)).within(Container::workspace("2"));
        assert_eq!(shaper.style_for(&on_two).size, 0);
        assert_eq!(shaper.style_for(&tiled()), ROUNDED);

        assert_eq!(shaper.reshape(&on_two), Some(ShapeOutcome::Shaped(EdgeSelector::Both)));
        assert_eq!(fills(&shaper.sink().take_requests()).len(), 1);
    }

    #[test]
    fn test_shaper_reports_errors() {
        let errors = RefCell::new(Vec::new());
        let handler = |frame: &Frame, err: ToaruError| errors.borrow_mut().push((frame.window(), err));

        let conn = DummyConn::new();
        conn.fail_create(true);
        let shaper = Shaper::with_handler(conn, ROUNDED, handler);

        assert_eq!(shaper.reshape(&tiled()), None);

        let errors = errors.borrow();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 7);
        assert!(matches!(errors[0].1, ToaruError::X(XError::ServerError(_))));
    }
}
