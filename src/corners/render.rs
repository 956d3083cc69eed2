//! Per-style corner renderers.
//!
//! Each renderer returns the opaque part of the two corner notches
//! along one edge of the frame. The notches themselves are cut by the
//! [compositor](super::compose), so whatever a renderer returns is
//! what remains visible of each `size`×`size` corner square.

use crate::types::{Point, Size};

use super::primitive::{Arc, Polygon, Primitive, Rectangle, DEGREE};
use super::{CornerShape, CornerStyle, Edge};

/// A function rendering the corners along a single edge.
///
/// Takes the frame size and the corner size.
pub type RenderFn = fn(Size, u32) -> Vec<Primitive>;

/// The pair of edge renderers for a corner style.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub top: RenderFn,
    pub bottom: RenderFn,
}

const SQUARE: Renderer = Renderer {
    top: square_top,
    bottom: square_bottom,
};

const ROUNDED: Renderer = Renderer {
    top: rounded_top,
    bottom: rounded_bottom,
};

const TRIANGULAR: Renderer = Renderer {
    top: triangled_top,
    bottom: triangled_bottom,
};

const TRIMMED: Renderer = Renderer {
    top: trimmed,
    bottom: trimmed,
};

impl Renderer {
    /// Looks up the renderers for a corner shape.
    pub const fn for_shape(shape: CornerShape) -> Self {
        match shape {
            CornerShape::Default => SQUARE,
            CornerShape::Rounded => ROUNDED,
            CornerShape::Triangular => TRIANGULAR,
            CornerShape::Trimmed => TRIMMED,
        }
    }

    /// The renderers for an undecorated edge.
    pub const fn plain() -> Self {
        SQUARE
    }

    /// Renders the corners along the given edge.
    ///
    /// Sizes above [`CornerStyle::MAX_SIZE`] are drawn at that size.
    pub fn render(&self, edge: Edge, frame: Size, size: u32) -> Vec<Primitive> {
        let size = size.min(CornerStyle::MAX_SIZE);
        match edge {
            Edge::Top => (self.top)(frame, size),
            Edge::Bottom => (self.bottom)(frame, size),
        }
    }
}

/// Renders the corners of `shape` along `edge`.
pub fn render_edge(shape: CornerShape, edge: Edge, frame: Size, size: u32) -> Vec<Primitive> {
    Renderer::for_shape(shape).render(edge, frame, size)
}

/// `total - extent`, without overflowing for any frame or corner size.
///
/// Results outside the `i32` range only arise for frames far larger
/// than any surface the server can allocate.
#[inline]
pub(super) fn inset(total: u32, extent: u32) -> i32 {
    (total as i64 - extent as i64) as i32
}

// x offset of the right-hand corner box of width `extent`
#[inline]
fn right(frame: Size, extent: u32) -> i32 {
    inset(frame.width, extent)
}

// y offset of the bottom corner box of height `extent`
#[inline]
fn lower(frame: Size, extent: u32) -> i32 {
    inset(frame.height, extent)
}

fn square_top(frame: Size, size: u32) -> Vec<Primitive> {
    vec![
        Rectangle::new(0, 0, size, size).into(),
        Rectangle::new(right(frame, size), 0, size, size).into(),
    ]
}

fn square_bottom(frame: Size, size: u32) -> Vec<Primitive> {
    let y = lower(frame, size);

    vec![
        Rectangle::new(0, y, size, size).into(),
        Rectangle::new(right(frame, size), y, size, size).into(),
    ]
}

fn rounded_top(frame: Size, size: u32) -> Vec<Primitive> {
    let d = size * 2;

    vec![
        Arc {
            x: 0,
            y: 0,
            width: d,
            height: d,
            start: 90 * DEGREE,
            span: 90 * DEGREE,
        }
        .into(),
        Arc {
            x: right(frame, d),
            y: 0,
            width: d,
            height: d,
            start: 0,
            span: 90 * DEGREE,
        }
        .into(),
    ]
}

fn rounded_bottom(frame: Size, size: u32) -> Vec<Primitive> {
    let d = size * 2;
    let y = lower(frame, d);

    vec![
        Arc {
            x: 0,
            y,
            width: d,
            height: d,
            start: 180 * DEGREE,
            span: 90 * DEGREE,
        }
        .into(),
        Arc {
            x: right(frame, d),
            y,
            width: d,
            height: d,
            start: 270 * DEGREE,
            span: 90 * DEGREE,
        }
        .into(),
    ]
}

fn triangled_top(frame: Size, size: u32) -> Vec<Primitive> {
    let s = size as i32;
    let x = right(frame, size);
    let w = frame.width as i32;

    vec![
        Polygon::closed([Point::new(s, 0), Point::new(s, s), Point::new(0, s)]).into(),
        Polygon::closed([Point::new(x, 0), Point::new(x, s), Point::new(w, s)]).into(),
    ]
}

fn triangled_bottom(frame: Size, size: u32) -> Vec<Primitive> {
    let s = size as i32;
    let (x, y) = (right(frame, size), lower(frame, size));
    let (w, h) = (frame.width as i32, frame.height as i32);

    vec![
        Polygon::closed([Point::new(s, h), Point::new(s, y), Point::new(0, y)]).into(),
        Polygon::closed([Point::new(x, h), Point::new(x, y), Point::new(w, y)]).into(),
    ]
}

// the notch cut by the compositor is the trim itself
fn trimmed(_: Size, _: u32) -> Vec<Primitive> {
    Vec::new()
}
