//! Drawable primitives and the regions composed from them.
//!
//! All coordinates are relative to the top-left corner of the frame,
//! and all arc angles are in 1/64ths of a degree, as the X protocol
//! expects them.

use crate::types::{Point, Size};

/// One degree, in X protocol angle units.
pub const DEGREE: i32 = 64;

/// A full turn, in X protocol angle units.
pub const FULL_TURN: i32 = 360 * DEGREE;

/// An axis-aligned filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A filled pie slice of the ellipse inscribed in its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Start angle, counter-clockwise from three o'clock.
    pub start: i32,
    /// Angular extent, counter-clockwise.
    pub span: i32,
}

/// A closed, filled polygon.
///
/// The last point always repeats the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its vertices, closing it if needed.
    pub fn closed<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points: Vec<Point> = vertices.into_iter().collect();
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if first != last {
                points.push(first);
            }
        }
        Self { points }
    }

    /// The points of the polygon, including the closing point.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of distinct vertices.
    pub fn vertices(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// A shape that can be filled onto a mask surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Rectangle(Rectangle),
    Arc(Arc),
    Polygon(Polygon),
}

impl Primitive {
    /// Reflects the primitive about the horizontal centre line
    /// of a surface `height` pixels tall.
    pub fn mirror_y(&self, height: u32) -> Self {
        let flip = |y: i32, h: u32| (height as i64 - y as i64 - h as i64) as i32;

        match self {
            Self::Rectangle(r) => Self::Rectangle(Rectangle {
                y: flip(r.y, r.height),
                ..*r
            }),
            Self::Arc(a) => Self::Arc(Arc {
                y: flip(a.y, a.height),
                // a vertical flip negates angles, so [start, start + span]
                // becomes [-(start + span), -start]
                start: (-(a.start + a.span)).rem_euclid(FULL_TURN),
                ..*a
            }),
            Self::Polygon(p) => Self::Polygon(Polygon {
                points: p.points.iter().map(|pt| pt.mirror_y(height)).collect(),
            }),
        }
    }

    /// Whether the primitive lies entirely within a surface of the given size.
    ///
    /// Edges are inclusive, since polygon vertices sit on the boundary.
    pub fn within(&self, size: Size) -> bool {
        let (w, h) = (size.width as i64, size.height as i64);
        let boxed = |x: i32, y: i32, bw: u32, bh: u32| {
            let (x, y) = (x as i64, y as i64);
            x >= 0 && y >= 0 && x + bw as i64 <= w && y + bh as i64 <= h
        };

        match self {
            Self::Rectangle(r) => boxed(r.x, r.y, r.width, r.height),
            Self::Arc(a) => boxed(a.x, a.y, a.width, a.height),
            Self::Polygon(p) => p.points.iter().all(|pt| {
                let (x, y) = (pt.x as i64, pt.y as i64);
                (0..=w).contains(&x) && (0..=h).contains(&y)
            }),
        }
    }
}

impl From<Rectangle> for Primitive {
    fn from(from: Rectangle) -> Self {
        Self::Rectangle(from)
    }
}

impl From<Arc> for Primitive {
    fn from(from: Arc) -> Self {
        Self::Arc(from)
    }
}

impl From<Polygon> for Primitive {
    fn from(from: Polygon) -> Self {
        Self::Polygon(from)
    }
}

/// The value a fill writes to the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Excluded from the frame's visible and clickable area.
    Clear,
    /// Included in the frame's visible and clickable area.
    Opaque,
}

impl Polarity {
    /// The pixel value on a 1-bit surface.
    pub fn pixel(&self) -> u32 {
        match self {
            Self::Clear => 0,
            Self::Opaque => 1,
        }
    }
}

/// A single primitive filled with a given polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    pub polarity: Polarity,
    pub primitive: Primitive,
}

/// A composed mask: fills painted in order onto a surface
/// of the region's size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    size: Size,
    fills: Vec<Fill>,
}

impl Region {
    /// Creates an empty region.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            fills: Vec::new(),
        }
    }

    /// A region covering the whole frame, with no corner decoration.
    pub fn full(size: Size) -> Self {
        let mut region = Self::new(size);
        region.push(Polarity::Opaque, full_rect(size));
        region
    }

    /// Appends a fill.
    pub fn push<P: Into<Primitive>>(&mut self, polarity: Polarity, primitive: P) {
        self.fills.push(Fill {
            polarity,
            primitive: primitive.into(),
        })
    }

    /// Appends several fills of the same polarity.
    pub fn extend<I>(&mut self, polarity: Polarity, primitives: I)
    where
        I: IntoIterator<Item = Primitive>,
    {
        for primitive in primitives {
            self.push(polarity, primitive)
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The fills, in painting order.
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Iterates over the primitives, ignoring polarity.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.fills.iter().map(|f| &f.primitive)
    }

    /// Whether this region is the undecorated full rectangle.
    pub fn is_plain(&self) -> bool {
        *self == Self::full(self.size)
    }
}

/// The rectangle covering a whole surface.
pub fn full_rect(size: Size) -> Rectangle {
    Rectangle::new(0, 0, size.width, size.height)
}
