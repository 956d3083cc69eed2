//! Composing the full mask for a frame.

use strum::IntoEnumIterator;

use crate::types::{Point, Size};

use super::primitive::{full_rect, Polarity, Polygon, Region};
use super::render::{inset, Renderer};
use super::{CornerStyle, Edge, EdgeSelector};

/// Builds the region for a frame of the given size.
///
/// The region is painted in three passes:
///
/// 1. the whole surface is cleared,
/// 2. a dodecagon covering everything but the four `size`×`size`
///    corner squares is filled in, and
/// 3. each corner square is refined. Corners along an edge in
///    `selector` get the style's own primitives, corners along
///    the remaining edge are filled in flat.
///
/// A style with a size of zero yields the plain full rectangle.
///
/// Sizes too large for the frame are not corrected and give
/// overlapping primitives. Sizes above [`CornerStyle::MAX_SIZE`]
/// are drawn at that size.
pub fn compose(frame: Size, style: CornerStyle, selector: EdgeSelector) -> Region {
    if style.is_noop() {
        return Region::full(frame);
    }

    let mut region = Region::new(frame);
    let size = style.drawn_size();

    region.push(Polarity::Clear, full_rect(frame));
    region.push(Polarity::Opaque, dodecagon(frame, size));

    let styled = Renderer::for_shape(style.shape);
    for edge in Edge::iter() {
        let renderer = if selector.contains(edge) {
            styled
        } else {
            Renderer::plain()
        };
        region.extend(Polarity::Opaque, renderer.render(edge, frame, size));
    }

    region
}

/// The outline of a frame with all four corners notched in by `size`.
pub fn dodecagon(frame: Size, size: u32) -> Polygon {
    let size = size.min(CornerStyle::MAX_SIZE);
    let s = size as i32;
    let (w, h) = (frame.width as i32, frame.height as i32);
    let (ws, hs) = (inset(frame.width, size), inset(frame.height, size));

    Polygon::closed([
        Point::new(s, 0),
        Point::new(ws, 0),
        Point::new(ws, s),
        Point::new(w, s),
        Point::new(w, hs),
        Point::new(ws, hs),
        Point::new(ws, h),
        Point::new(s, h),
        Point::new(s, hs),
        Point::new(0, hs),
        Point::new(0, s),
        Point::new(s, s),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corners::primitive::{Arc, Primitive, Rectangle};
    use crate::corners::CornerShape;

    const FRAME: Size = Size::new(300, 200);

    #[test]
    fn test_zero_size_is_plain() {
        for shape in CornerShape::iter() {
            for selector in [EdgeSelector::Both, EdgeSelector::Bottom] {
                let region = compose(FRAME, CornerStyle::new(shape, 0), selector);
                assert!(region.is_plain(), "{} with size 0 is not plain", shape);
                assert_eq!(region.fills().len(), 1);
            }
        }
    }

    #[test]
    fn test_dodecagon() {
        let poly = dodecagon(FRAME, 10);

        assert_eq!(poly.vertices(), 12);
        assert_eq!(poly.points().first(), poly.points().last());
        assert!(Primitive::from(poly).within(FRAME));
    }

    #[test]
    fn test_rounded_both() {
        let region = compose(FRAME, CornerStyle::new(CornerShape::Rounded, 10), EdgeSelector::Both);
        let fills = region.fills();

        assert_eq!(fills.len(), 6);
        assert_eq!(fills[0].polarity, Polarity::Clear);
        assert_eq!(fills[0].primitive, Primitive::Rectangle(Rectangle::new(0, 0, 300, 200)));
        assert_eq!(fills[1].primitive, Primitive::Polygon(dodecagon(FRAME, 10)));
        assert!(fills[1..].iter().all(|f| f.polarity == Polarity::Opaque));

        assert_eq!(
            fills[2].primitive,
            Primitive::Arc(Arc { x: 0, y: 0, width: 20, height: 20, start: 5760, span: 5760 })
        );
        assert_eq!(
            fills[5].primitive,
            Primitive::Arc(Arc { x: 280, y: 180, width: 20, height: 20, start: 17280, span: 5760 })
        );
    }

    #[test]
    fn test_suppressed_top_is_filled_flat() {
        let region = compose(FRAME, CornerStyle::new(CornerShape::Rounded, 10), EdgeSelector::Bottom);
        let corners: Vec<_> = region.primitives().skip(2).cloned().collect();

        assert_eq!(
            corners[..2],
            [
                Primitive::Rectangle(Rectangle::new(0, 0, 10, 10)),
                Primitive::Rectangle(Rectangle::new(290, 0, 10, 10)),
            ]
        );
        assert!(matches!(corners[2], Primitive::Arc(_)));
        assert!(matches!(corners[3], Primitive::Arc(_)));
    }

    #[test]
    fn test_trimmed_is_asymmetric() {
        let style = CornerStyle::new(CornerShape::Trimmed, 6);

        // both edges cut: nothing refines the notches
        let both = compose(FRAME, style, EdgeSelector::Both);
        assert_eq!(both.fills().len(), 2);

        // top suppressed: only the top corners are filled back in
        let bottom = compose(FRAME, style, EdgeSelector::Bottom);
        let corners: Vec<_> = bottom.primitives().skip(2).cloned().collect();
        assert_eq!(
            corners,
            vec![
                Primitive::Rectangle(Rectangle::new(0, 0, 6, 6)),
                Primitive::Rectangle(Rectangle::new(294, 0, 6, 6)),
            ]
        );
    }

    #[test]
    fn test_region_within_frame() {
        for shape in CornerShape::iter() {
            for size in [1, 5, 50, 100] {
                let region = compose(FRAME, CornerStyle::new(shape, size), EdgeSelector::Both);
                assert!(region.primitives().all(|p| p.within(FRAME)));
            }
        }
    }

    #[test]
    fn test_oversized_corners_are_not_corrected() {
        let frame = Size::new(20, 20);
        assert!(!frame.fits_corner(15));

        for shape in [CornerShape::Default, CornerShape::Rounded, CornerShape::Triangular] {
            let region = compose(frame, CornerStyle::new(shape, 15), EdgeSelector::Both);
            assert_eq!(region.fills().len(), 6, "{} has the wrong fill count", shape);
        }

        // the notches cross over each other
        let poly = dodecagon(frame, 15);
        assert_eq!(poly.points()[1], Point::new(5, 0));

        let region = compose(frame, CornerStyle::new(CornerShape::Rounded, 15), EdgeSelector::Both);
        assert_eq!(
            region.fills()[2].primitive,
            Primitive::Arc(Arc { x: 0, y: 0, width: 30, height: 30, start: 5760, span: 5760 })
        );
        assert_eq!(
            region.fills()[3].primitive,
            Primitive::Arc(Arc { x: -10, y: 0, width: 30, height: 30, start: 0, span: 5760 })
        );
    }

    #[test]
    fn test_huge_sizes_do_not_overflow() {
        for shape in CornerShape::iter() {
            for size in [1 << 31, 3_000_000_000, u32::MAX] {
                let style = CornerStyle::new(shape, size);
                let region = compose(FRAME, style, EdgeSelector::Bottom);

                let bounded = CornerStyle::new(shape, CornerStyle::MAX_SIZE);
                assert_eq!(region, compose(FRAME, bounded, EdgeSelector::Bottom));
            }
        }

        let poly = dodecagon(Size::new(u32::MAX, u32::MAX), u32::MAX);
        assert_eq!(poly.vertices(), 12);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let style = CornerStyle::new(CornerShape::Triangular, 12);

        assert_eq!(
            compose(FRAME, style, EdgeSelector::Both),
            compose(FRAME, style, EdgeSelector::Both)
        );
    }
}
