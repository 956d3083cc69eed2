//! Corner mask synthesis.
//!
//! This module turns a frame's size, its corner style and its place in
//! the container tree into a [`Region`]: the ordered list of fills that,
//! painted onto a 1-bit surface, give the frame its decorated corners.
//!
//! The work is split into three pure stages:
//!
//! - [`classify`] decides which edges of the frame get decorated,
//! - the [renderers][render] produce the primitives for a single edge
//!   of a given style, and
//! - [`compose`] assembles the full region out of both.
//!
//! None of these talk to the X server. Submitting the result is done
//! by [`apply_shape`](crate::shape::apply_shape).

pub mod classify;
pub mod compose;
pub mod primitive;
pub mod render;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[doc(inline)]
pub use classify::classify;
#[doc(inline)]
pub use compose::compose;
#[doc(inline)]
pub use primitive::{Arc, Fill, Polarity, Polygon, Primitive, Rectangle, Region};
#[doc(inline)]
pub use render::{render_edge, Renderer};

/// The shape of a decorated corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum CornerShape {
    /// Plain square corners.
    #[default]
    #[strum(to_string = "default", serialize = "square")]
    Default,
    /// Corners rounded with a quarter circle.
    Rounded,
    /// Corners cut diagonally.
    #[strum(to_string = "triangular", serialize = "triangle")]
    Triangular,
    /// Corners cut out with a square notch.
    #[strum(to_string = "trimmed", serialize = "trim")]
    Trimmed,
}

/// The resolved corner configuration for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CornerStyle {
    pub shape: CornerShape,
    /// The corner size in pixels.
    pub size: u32,
}

impl CornerStyle {
    /// The largest corner size that can be drawn.
    ///
    /// A rounded corner is an arc of twice this size, which must fit
    /// in a 16-bit protocol dimension. Larger sizes are drawn as if
    /// they were this size.
    pub const MAX_SIZE: u32 = i16::MAX as u32;

    pub const fn new(shape: CornerShape, size: u32) -> Self {
        Self { shape, size }
    }

    /// The size the corners are actually drawn at.
    pub fn drawn_size(&self) -> u32 {
        self.size.min(Self::MAX_SIZE)
    }

    /// Whether this style leaves the frame a plain rectangle.
    pub fn is_noop(&self) -> bool {
        self.size == 0
    }
}

/// A horizontal edge of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Edge {
    Top,
    Bottom,
}

/// The set of edges whose corners get decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EdgeSelector {
    Top,
    Bottom,
    Both,
}

impl EdgeSelector {
    /// Whether the given edge is decorated.
    pub fn contains(&self, edge: Edge) -> bool {
        match self {
            Self::Both => true,
            Self::Top => edge == Edge::Top,
            Self::Bottom => edge == Edge::Bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corner_shape() {
        assert_eq!("rounded".parse::<CornerShape>().unwrap(), CornerShape::Rounded);
        assert_eq!("square".parse::<CornerShape>().unwrap(), CornerShape::Default);
        assert_eq!("trim".parse::<CornerShape>().unwrap(), CornerShape::Trimmed);
        assert_eq!("triangle".parse::<CornerShape>().unwrap(), CornerShape::Triangular);
        assert!("hexagonal".parse::<CornerShape>().is_err());

        assert_eq!(CornerShape::Triangular.to_string(), "triangular");
    }

    #[test]
    fn test_edge_selector() {
        assert!(EdgeSelector::Both.contains(Edge::Top));
        assert!(EdgeSelector::Both.contains(Edge::Bottom));
        assert!(!EdgeSelector::Bottom.contains(Edge::Top));
        assert!(EdgeSelector::Bottom.contains(Edge::Bottom));
    }
}
