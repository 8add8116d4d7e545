use std::collections::BTreeMap;

use super::GridItem;
use super::Rect;

/// Let the rightmost item of each row absorb the empty columns to its right.
///
/// A row is the set of items sharing the same `y`. The trailing gap runs up to
/// the grid edge or to the nearest item on the right whose rows intersect the
/// trailing item, so stretching never creates an overlap. An item only grows
/// when the whole gap fits within half of its width; otherwise it is left as
/// is. Growing by a capped part of a larger gap would leave a smaller gap that
/// the next run grows into again, so tidying twice would not be stable. A lone
/// 6-wide item in 12 columns therefore stays 6 wide. Item order is preserved.
#[must_use]
pub fn stretch_trailing<T: GridItem>(items: &[T], columns: i32) -> Vec<T> {
    let rects: Vec<Rect> = items.iter().map(GridItem::rect).collect();
    let mut stretched = items.to_vec();

    let mut rows: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, rect) in rects.iter().enumerate() {
        rows.entry(rect.y).or_default().push(idx);
    }

    for row in rows.values() {
        let Some(&last) = row.iter().max_by_key(|&&idx| rects[idx].x) else {
            continue;
        };

        let rect = rects[last];
        let edge = rects
            .iter()
            .enumerate()
            .filter(|&(idx, other)| {
                idx != last && other.spans_rows_of(&rect) && other.x >= rect.right()
            })
            .map(|(_, other)| other.x)
            .min()
            .unwrap_or(columns)
            .min(columns);

        let gap = edge.saturating_sub(rect.right());
        let budget = rect.w / 2;

        if gap > 0 && gap <= budget {
            tracing::trace!(
                "stretching '{}' on row {} from {} to {} columns",
                items[last].id(),
                rect.y,
                rect.w,
                rect.w.saturating_add(gap)
            );

            stretched[last] = items[last].with_rect(Rect {
                w: rect.w.saturating_add(gap),
                ..rect
            });
        }
    }

    stretched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutItem;

    fn widths(items: &[LayoutItem]) -> Vec<i32> {
        items.iter().map(|i| i.w).collect()
    }

    #[test]
    fn test_lone_item_fills_row_when_gap_is_half_its_width() {
        let items = vec![LayoutItem::new("a", 0, 0, 8, 2)];
        let stretched = stretch_trailing(&items, 12);
        assert_eq!(stretched, vec![LayoutItem::new("a", 0, 0, 12, 2)]);
    }

    #[test]
    fn test_gap_larger_than_budget_is_left_alone() {
        let items = vec![LayoutItem::new("a", 0, 0, 4, 2)];
        let stretched = stretch_trailing(&items, 12);
        assert_eq!(widths(&stretched), vec![4]);
    }

    #[test]
    fn test_gap_just_over_budget_is_not_partially_filled() {
        let items = vec![LayoutItem::new("a", 0, 0, 6, 2)];
        let stretched = stretch_trailing(&items, 12);
        assert_eq!(widths(&stretched), vec![6]);
        assert_eq!(stretch_trailing(&stretched, 12), stretched);
    }

    #[test]
    fn test_only_last_item_in_row_grows() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 4, 1),
            LayoutItem::new("b", 4, 0, 6, 1),
        ];
        let stretched = stretch_trailing(&items, 12);
        assert_eq!(widths(&stretched), vec![4, 8]);
    }

    #[test]
    fn test_each_row_is_stretched_independently() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 10, 1),
            LayoutItem::new("b", 0, 1, 2, 1),
            LayoutItem::new("c", 2, 1, 8, 1),
        ];
        let stretched = stretch_trailing(&items, 12);
        assert_eq!(widths(&stretched), vec![12, 2, 10]);
    }

    #[test]
    fn test_full_row_is_untouched() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 6, 1),
            LayoutItem::new("b", 6, 0, 6, 1),
        ];
        assert_eq!(stretch_trailing(&items, 12), items);
    }

    #[test]
    fn test_taller_item_from_earlier_row_blocks_stretch() {
        // "tall" starts on row 0 and reaches into row 1
        let items = vec![
            LayoutItem::new("a", 0, 0, 8, 1),
            LayoutItem::new("tall", 8, 0, 2, 3),
            LayoutItem::new("b", 0, 1, 6, 1),
        ];
        let stretched = stretch_trailing(&items, 12);

        assert_eq!(stretched[2], LayoutItem::new("b", 0, 1, 8, 1));
        assert!(!stretched[2].rect().overlaps(&stretched[1].rect()));
    }

    #[test]
    fn test_single_column_item_never_grows() {
        let items = vec![LayoutItem::new("a", 0, 0, 1, 1)];
        assert_eq!(widths(&stretch_trailing(&items, 2)), vec![1]);
    }

    #[test]
    fn test_stretch_is_stable() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 8, 2),
            LayoutItem::new("b", 0, 2, 3, 1),
        ];
        let once = stretch_trailing(&items, 12);
        assert_eq!(stretch_trailing(&once, 12), once);
    }
}
