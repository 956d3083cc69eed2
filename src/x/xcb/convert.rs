//! Conversions between Toaru and xcb types.

use xcb::x;

use crate::corners::{Arc, Rectangle};
use crate::types::Point;
use crate::x::core::{coord, extent};

#[doc(hidden)]
impl From<Rectangle> for x::Rectangle {
    fn from(from: Rectangle) -> x::Rectangle {
        x::Rectangle {
            x: coord(from.x),
            y: coord(from.y),
            width: extent(from.width),
            height: extent(from.height),
        }
    }
}

#[doc(hidden)]
impl From<Arc> for x::Arc {
    fn from(from: Arc) -> x::Arc {
        x::Arc {
            x: coord(from.x),
            y: coord(from.y),
            width: extent(from.width),
            height: extent(from.height),
            angle1: coord(from.start),
            angle2: coord(from.span),
        }
    }
}

#[doc(hidden)]
impl From<Point> for x::Point {
    fn from(from: Point) -> x::Point {
        x::Point {
            x: coord(from.x),
            y: coord(from.y),
        }
    }
}
