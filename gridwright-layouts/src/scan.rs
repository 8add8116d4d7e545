//! Collision-free position search against a fixed set of placed rectangles.

use super::Rect;

/// Whether `rect` overlaps any of the `placed` rectangles.
#[must_use]
pub fn collides(rect: &Rect, placed: &[Rect]) -> bool {
    placed.iter().any(|other| rect.overlaps(other))
}

/// First row below every placed rectangle, or 0 when nothing is placed.
#[must_use]
pub fn bottom(placed: &[Rect]) -> i32 {
    placed.iter().map(Rect::bottom).max().unwrap_or(0).max(0)
}

/// Rows a first-fit scan can stop on: the top of the grid and the first row
/// below each placed rectangle. Any other row has a free row directly above it
/// or no free column at all.
fn candidate_rows(placed: &[Rect], last_row: i32) -> Vec<i32> {
    let mut rows: Vec<i32> = std::iter::once(0)
        .chain(placed.iter().map(Rect::bottom))
        .filter(|y| (0..=last_row).contains(y))
        .collect();
    rows.sort_unstable();
    rows.dedup();
    rows
}

/// Columns a leftmost-first scan can stop on, up to `max_x`.
fn candidate_columns(placed: &[Rect], max_x: i32) -> Vec<i32> {
    let mut columns: Vec<i32> = std::iter::once(0)
        .chain(placed.iter().map(Rect::right))
        .filter(|x| (0..=max_x).contains(x))
        .collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}

/// Scan rows `0..=last_row` left to right and return the first position where
/// `rect` does not collide with anything in `placed`.
///
/// `rect` is clamped to the grid before scanning, so the returned rectangle
/// always satisfies `x + w <= columns`. Only rows and columns where a placed
/// rectangle ends are visited, which gives the same answer as walking every
/// cell.
#[must_use]
pub fn scan_rows(rect: Rect, placed: &[Rect], columns: i32, last_row: i32) -> Option<Rect> {
    let rect = rect.clamped(columns);
    let xs = candidate_columns(placed, columns.saturating_sub(rect.w));

    for y in candidate_rows(placed, last_row) {
        for &x in &xs {
            let candidate = rect.at(x, y);
            if !collides(&candidate, placed) {
                return Some(candidate);
            }
        }
    }

    None
}

/// Greedy row scan bounded by the rectangle's own row: pulls it as far up and
/// then as far left as the free space allows, never further down.
#[must_use]
pub fn greedy_place(rect: Rect, placed: &[Rect], columns: i32) -> Option<Rect> {
    let clamped = rect.clamped(columns);
    scan_rows(clamped, placed, columns, clamped.y)
}

/// Leftmost free column on the rectangle's own row.
///
/// Never fails: when the whole row is taken the rectangle keeps its own column
/// clamped to the grid, which may still collide.
#[must_use]
pub fn leftmost_slide(rect: Rect, placed: &[Rect], columns: i32) -> Rect {
    let rect = rect.clamped(columns);
    let max_x = columns.saturating_sub(rect.w);

    candidate_columns(placed, max_x)
        .into_iter()
        .map(|x| rect.at(x, rect.y))
        .find(|candidate| !collides(candidate, placed))
        .unwrap_or_else(|| rect.at(rect.x.clamp(0, max_x.max(0)), rect.y))
}

/// Slide `rect` upwards until the next row up collides or the top of the grid
/// is reached.
///
/// `rect` must not already collide with `placed`; it then stops right below
/// the lowest placed rectangle sharing one of its columns.
#[must_use]
pub fn move_up(rect: Rect, placed: &[Rect]) -> Rect {
    if rect.y <= 0 {
        return rect;
    }

    let y = placed
        .iter()
        .filter(|other| other.spans_columns_of(&rect) && other.bottom() <= rect.y)
        .map(Rect::bottom)
        .max()
        .unwrap_or(0)
        .max(0);

    rect.at(rect.x, y)
}

/// Collision-free position for one rectangle during compaction.
///
/// Tries the greedy row scan first. If every position up to the rectangle's
/// own row is taken it falls back to the leftmost slide, dropping below the
/// placed set when the slide still collides, and packs the result upwards.
#[must_use]
pub fn place(rect: Rect, placed: &[Rect], columns: i32) -> Rect {
    if let Some(found) = greedy_place(rect, placed, columns) {
        return found;
    }

    let mut slid = leftmost_slide(rect, placed, columns);
    if collides(&slid, placed) {
        let y = bottom(placed);
        tracing::warn!(
            "no free column on row {} for a {}x{} rectangle, dropping it to row {}",
            slid.y,
            slid.w,
            slid.h,
            y
        );
        slid = slid.at(slid.x, y);
    }

    move_up(slid, placed)
}
