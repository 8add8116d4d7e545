use super::GridItem;

/// Copy of `item` forced inside a grid of `columns` columns.
///
/// See [`crate::Rect::clamped`] for the exact rules. Sizes are left as they
/// are, so callers that accept untrusted input should go through
/// [`normalize_to_grid`] instead.
#[must_use]
pub fn clamp_to_grid<T: GridItem>(item: &T, columns: i32) -> T {
    item.with_rect(item.rect().clamped(columns))
}

/// Floor the item's size at one cell, then clamp it to the grid.
#[must_use]
pub fn normalize_to_grid<T: GridItem>(item: &T, columns: i32) -> T {
    let rect = item.rect();
    let normalized = rect.normalized();

    if normalized != rect {
        tracing::debug!(
            "flooring size of '{}' from {}x{} to {}x{}",
            item.id(),
            rect.w,
            rect.h,
            normalized.w,
            normalized.h
        );
    }

    item.with_rect(normalized.clamped(columns))
}
