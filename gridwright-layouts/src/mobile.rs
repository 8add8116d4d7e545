use super::GridItem;
use super::Rect;
use super::sort_canonical;

/// Single-column arrangement for the narrow tiers.
///
/// Items are taken in reading order and stacked top to bottom at full width,
/// each keeping its own height (floored at one row).
#[must_use]
pub fn stack<T: GridItem>(items: &[T], columns: i32) -> Vec<T> {
    let mut sorted = items.to_vec();
    sort_canonical(&mut sorted);

    let mut cursor = 0;
    sorted
        .iter()
        .map(|item| {
            let h = item.rect().h.max(1);
            let stacked = item.with_rect(Rect::new(0, cursor, columns, h));
            cursor = cursor.saturating_add(h);
            stacked
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutItem;

    #[test]
    fn test_items_stack_at_full_width() {
        let items = vec![
            LayoutItem::new("b", 2, 0, 2, 1),
            LayoutItem::new("a", 0, 0, 2, 3),
        ];

        assert_eq!(
            stack(&items, 4),
            vec![
                LayoutItem::new("a", 0, 0, 4, 3),
                LayoutItem::new("b", 0, 3, 4, 1),
            ]
        );
    }

    #[test]
    fn test_reading_order_is_preserved() {
        let items = vec![
            LayoutItem::new("late", 0, 9, 1, 2),
            LayoutItem::new("right", 3, 0, 1, 1),
            LayoutItem::new("left", 0, 0, 1, 1),
        ];
        let ids: Vec<String> = stack(&items, 4).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["left", "right", "late"]);
    }

    #[test]
    fn test_zero_height_takes_one_row() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 1, 0),
            LayoutItem::new("b", 0, 1, 1, 2),
        ];
        let stacked = stack(&items, 4);
        assert_eq!(stacked[0].h, 1);
        assert_eq!(stacked[1].y, 1);
    }

    #[test]
    fn test_cursor_saturates_on_huge_heights() {
        let items = vec![
            LayoutItem::new("a", 0, 0, 1, i32::MAX),
            LayoutItem::new("b", 0, 1, 1, 3),
        ];
        let stacked = stack(&items, 4);
        assert_eq!(stacked[1].y, i32::MAX);
        assert!(!stacked[0].rect().overlaps(&stacked[1].rect()));
    }

    #[test]
    fn test_empty_input() {
        assert!(stack::<LayoutItem>(&[], 4).is_empty());
    }
}
