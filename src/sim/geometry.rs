//! Axis-aligned box geometry
//!
//! Everything the collision code needs to know about rectangles lives here.
//! Boxes are plain values: deriving a new box never mutates the old one.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel units, origin top-left
///
/// Used both as a whole-entity coarse box in world space and as a sub-box in
/// an entity's local space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Create a box. Negative dimensions are a programming error.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(
            width >= 0 && height >= 0,
            "bounding box dimensions must be non-negative, got {width}x{height}"
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanning `size` from `origin`
    pub fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    #[inline]
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Shrink the box by `amount` on every side
    ///
    /// Panics if the result would have a negative dimension.
    pub fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2 * amount,
            self.height - 2 * amount,
        )
    }

    /// Same box moved by `offset` (local space -> world space)
    #[inline]
    pub fn translated_by(&self, offset: IVec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    pub fn with_x(&self, x: i32) -> Self {
        Self { x, ..*self }
    }

    pub fn with_width(&self, width: i32) -> Self {
        Self::new(self.x, self.y, width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned overlap test
///
/// Strict on every edge: boxes that only touch do not overlap.
#[inline]
pub fn boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(5, 5, 10, 10);
        assert!(boxes_overlap(&a, &b));

        let c = BoundingBox::new(20, 0, 5, 5);
        assert!(!boxes_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let right = BoundingBox::new(10, 0, 10, 10);
        let below = BoundingBox::new(0, 10, 10, 10);
        assert!(!boxes_overlap(&a, &right));
        assert!(!boxes_overlap(&a, &below));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = BoundingBox::new(0, 0, 100, 100);
        let inner = BoundingBox::new(40, 40, 2, 2);
        assert!(boxes_overlap(&outer, &inner));
        assert!(boxes_overlap(&inner, &outer));
    }

    #[test]
    fn test_inset_and_translate() {
        let b = BoundingBox::new(1, 1, 12, 8).inset(1);
        assert_eq!(b, BoundingBox::new(2, 2, 10, 6));

        let moved = BoundingBox::new(0, 0, 3, 4).translated_by(IVec2::new(5, -2));
        assert_eq!(moved, BoundingBox::new(5, -2, 3, 4));
        assert_eq!(moved.right(), 8);
        assert_eq!(moved.bottom(), 2);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_dimension_panics() {
        let _ = BoundingBox::new(0, 0, -1, 5);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_inset_past_zero_panics() {
        let _ = BoundingBox::new(0, 0, 1, 10).inset(1);
    }

    fn arb_box() -> impl Strategy<Value = BoundingBox> {
        (-200i32..200, -200i32..200, 0i32..100, 0i32..100)
            .prop_map(|(x, y, w, h)| BoundingBox::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(boxes_overlap(&a, &b), boxes_overlap(&b, &a));
        }

        #[test]
        fn translation_preserves_overlap(a in arb_box(), b in arb_box(), dx in -50i32..50, dy in -50i32..50) {
            let offset = IVec2::new(dx, dy);
            prop_assert_eq!(
                boxes_overlap(&a, &b),
                boxes_overlap(&a.translated_by(offset), &b.translated_by(offset))
            );
        }
    }
}
