use serde::Deserialize;
use serde::Serialize;

#[derive(
    Debug, Default, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Rectangle in grid cells
pub struct Rect {
    /// Column of the top-left corner
    pub x: i32,
    /// Row of the top-left corner
    pub y: i32,
    /// Width in columns (from the left edge)
    pub w: i32,
    /// Height in rows (from the top edge)
    pub h: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// First column to the right of the rectangle.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// First row below the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Axis-aligned intersection test. Rectangles that only share an edge do
    /// not overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.spans_columns_of(other) && self.spans_rows_of(other)
    }

    /// True when the row ranges of both rectangles intersect, regardless of
    /// their columns.
    #[must_use]
    pub const fn spans_rows_of(&self, other: &Rect) -> bool {
        intersects(self.y, self.h, other.y, other.h)
    }

    /// True when the column ranges of both rectangles intersect, regardless of
    /// their rows.
    #[must_use]
    pub const fn spans_columns_of(&self, other: &Rect) -> bool {
        intersects(self.x, self.w, other.x, other.w)
    }

    /// Floor the width and height at a single cell.
    #[must_use]
    pub const fn normalized(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: if self.w < 1 { 1 } else { self.w },
            h: if self.h < 1 { 1 } else { self.h },
        }
    }

    /// Force the rectangle inside a grid of `columns` columns.
    ///
    /// The width is truncated to the column count, negative coordinates are
    /// moved to zero and a rectangle overflowing the right edge is pushed left
    /// until it fits. Sizes are not floored here; see [`Rect::normalized`].
    #[must_use]
    pub fn clamped(&self, columns: i32) -> Rect {
        let mut rect = *self;

        if rect.w > columns {
            rect.w = columns;
        }

        if rect.x < 0 {
            rect.x = 0;
        }

        if rect.y < 0 {
            rect.y = 0;
        }

        if rect.right() > columns {
            rect.x = columns.saturating_sub(rect.w).max(0);
        }

        rect
    }

    /// Same rectangle at another position.
    #[must_use]
    pub const fn at(&self, x: i32, y: i32) -> Rect {
        Rect {
            x,
            y,
            w: self.w,
            h: self.h,
        }
    }
}

// half-open ranges, widened so edges past i32::MAX stay exact
const fn intersects(a_start: i32, a_len: i32, b_start: i32, b_len: i32) -> bool {
    let (a_start, a_len) = (a_start as i64, a_len as i64);
    let (b_start, b_len) = (b_start as i64, b_len as i64);
    a_start < b_start + b_len && b_start < a_start + a_len
}

/// Rectangle overlap test over any two item-shaped values.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: crate::GridItem,
    B: crate::GridItem,
{
    a.rect().overlaps(&b.rect())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod overlap_tests {
        use super::*;

        #[test]
        fn test_identical_rects_overlap() {
            let a = Rect::new(0, 0, 6, 2);
            assert!(a.overlaps(&a));
        }

        #[test]
        fn test_shared_vertical_edge_is_not_overlap() {
            let a = Rect::new(0, 0, 6, 2);
            let b = Rect::new(6, 0, 6, 2);
            assert!(!a.overlaps(&b));
            assert!(!b.overlaps(&a));
        }

        #[test]
        fn test_shared_horizontal_edge_is_not_overlap() {
            let a = Rect::new(0, 0, 4, 3);
            let b = Rect::new(0, 3, 4, 1);
            assert!(!a.overlaps(&b));
            assert!(!b.overlaps(&a));
        }

        #[test]
        fn test_partial_overlap() {
            let a = Rect::new(0, 0, 4, 4);
            let b = Rect::new(3, 3, 4, 4);
            assert!(a.overlaps(&b));
            assert!(b.overlaps(&a));
        }

        #[test]
        fn test_containment_is_overlap() {
            let outer = Rect::new(0, 0, 12, 10);
            let inner = Rect::new(4, 4, 1, 1);
            assert!(outer.overlaps(&inner));
            assert!(inner.overlaps(&outer));
        }

        #[test]
        fn test_negative_coordinates_are_valid_inputs() {
            let a = Rect::new(-3, -3, 4, 4);
            let b = Rect::new(0, 0, 1, 1);
            assert!(a.overlaps(&b));
        }

        #[test]
        fn test_spans_rows_ignores_columns() {
            let tall = Rect::new(8, 0, 4, 4);
            let row = Rect::new(0, 2, 2, 1);
            assert!(tall.spans_rows_of(&row));
            assert!(!tall.overlaps(&row));
            assert!(!Rect::new(0, 4, 2, 1).spans_rows_of(&tall));
        }

        #[test]
        fn test_edges_past_i32_max_are_exact() {
            let tall = Rect::new(0, i32::MAX - 1, 4, 5);
            let below = Rect::new(2, i32::MAX, 4, 1);
            assert!(tall.overlaps(&below));
            assert!(below.overlaps(&tall));
            assert_eq!(tall.bottom(), i32::MAX);
            assert_eq!(Rect::new(i32::MAX, 0, 4, 1).right(), i32::MAX);

            let far = Rect::new(0, i32::MAX, 12, i32::MAX);
            assert!(!Rect::new(0, 0, 12, i32::MAX).overlaps(&far));
        }
    }

    mod clamp_tests {
        use super::*;

        #[test]
        fn test_overflowing_right_edge_is_pushed_left() {
            let rect = Rect::new(10, 0, 6, 2).clamped(12);
            assert_eq!(rect, Rect::new(6, 0, 6, 2));
        }

        #[test]
        fn test_too_wide_is_truncated() {
            let rect = Rect::new(3, 1, 20, 2).clamped(12);
            assert_eq!(rect, Rect::new(0, 1, 12, 2));
        }

        #[test]
        fn test_negative_coordinates_move_to_zero() {
            let rect = Rect::new(-4, -2, 3, 2).clamped(12);
            assert_eq!(rect, Rect::new(0, 0, 3, 2));
        }

        #[test]
        fn test_in_bounds_is_untouched() {
            let rect = Rect::new(2, 5, 4, 3);
            assert_eq!(rect.clamped(12), rect);
        }

        #[test]
        fn test_clamp_does_not_floor_sizes() {
            let rect = Rect::new(0, 0, 0, -1).clamped(12);
            assert_eq!(rect.w, 0);
            assert_eq!(rect.h, -1);
        }

        #[test]
        fn test_normalized_floors_sizes() {
            let rect = Rect::new(2, 2, 0, -5).normalized();
            assert_eq!(rect, Rect::new(2, 2, 1, 1));
        }

        #[test]
        fn test_far_right_column_is_pulled_back() {
            let rect = Rect::new(i32::MAX, 0, 4, 1).clamped(12);
            assert_eq!(rect, Rect::new(8, 0, 4, 1));

            let rect = Rect::new(i32::MAX - 2, i32::MAX, i32::MAX, 3).clamped(12);
            assert_eq!(rect, Rect::new(0, i32::MAX, 12, 3));
        }

        #[test]
        fn test_right_edge_holds_for_any_input() {
            for x in -20..20 {
                for w in 1..20 {
                    let rect = Rect::new(x, 0, w, 1).clamped(8);
                    assert!(rect.x >= 0);
                    assert!(rect.right() <= 8, "{rect:?}");
                }
            }
        }
    }
}
