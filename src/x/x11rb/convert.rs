//! Conversions between Toaru and x11rb types.

use x11rb::protocol::xproto;

use crate::corners::{Arc, Rectangle};
use crate::types::Point;
use crate::x::core::{coord, extent};

#[doc(hidden)]
impl From<Rectangle> for xproto::Rectangle {
    fn from(from: Rectangle) -> xproto::Rectangle {
        xproto::Rectangle {
            x: coord(from.x),
            y: coord(from.y),
            width: extent(from.width),
            height: extent(from.height),
        }
    }
}

#[doc(hidden)]
impl From<Arc> for xproto::Arc {
    fn from(from: Arc) -> xproto::Arc {
        xproto::Arc {
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
impl From<Point> for xproto::Point {
    fn from(from: Point) -> xproto::Point {
        xproto::Point {
            x: coord(from.x),
            y: coord(from.y),
        }
    }
}
