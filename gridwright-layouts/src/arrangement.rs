use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use super::Breakpoints;
use super::GridItem;
use super::Rect;
use super::normalize_to_grid;
use super::overlaps;
use super::scan;
use super::sort_canonical;
use super::stack;
use super::stretch_trailing;

/// Extra rows scanned below the current arrangement when placing a new widget
pub const PLACEMENT_ROW_MARGIN: i32 = 50;

/// Upper bound on compaction passes before giving up on convergence
pub const MAX_COMPACTION_PASSES: usize = 32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Desired size of a new widget, in grid cells
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A broken arrangement invariant
pub enum Violation {
    NonPositiveSize { id: String, w: i32, h: i32 },
    OutOfBounds { id: String, rect: Rect, columns: i32 },
    Overlap { first: String, second: String },
    DuplicateId { id: String },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::NonPositiveSize { id, w, h } => {
                write!(f, "'{id}' has a non-positive size of {w}x{h}")
            }
            Violation::OutOfBounds { id, rect, columns } => write!(
                f,
                "'{id}' at ({}, {}) with width {} does not fit in {columns} columns",
                rect.x, rect.y, rect.w
            ),
            Violation::Overlap { first, second } => write!(f, "'{first}' overlaps '{second}'"),
            Violation::DuplicateId { id } => write!(f, "'{id}' appears more than once"),
        }
    }
}

pub trait Arrangement {
    /// Normalize a possibly overlapping or out-of-bounds arrangement into a
    /// compact, collision-free one for `breakpoint`.
    ///
    /// Tidying the result again returns it unchanged as long as compaction
    /// repeats itself within [`MAX_COMPACTION_PASSES`] passes. Past that limit
    /// the result is still collision-free but not guaranteed to be stable.
    fn tidy_layout<T: GridItem>(&self, items: &[T], breakpoint: &str) -> Vec<T>;

    /// Position for a new widget of `size` that collides with nothing in
    /// `items`, preferring the topmost then leftmost free slot.
    fn place_new_widget<T: GridItem>(&self, items: &[T], size: Size, breakpoint: &str) -> Rect;

    /// Every invariant `items` breaks at `breakpoint`.
    fn violations<T: GridItem>(&self, items: &[T], breakpoint: &str) -> Vec<Violation>;
}

impl Arrangement for Breakpoints {
    fn tidy_layout<T: GridItem>(&self, items: &[T], breakpoint: &str) -> Vec<T> {
        let columns = self.columns(breakpoint);

        if self.is_mobile(breakpoint) {
            tracing::debug!(
                "stacking {} items on mobile breakpoint '{}'",
                items.len(),
                breakpoint
            );
            return stack(items, columns);
        }

        settle(items, columns, breakpoint, MAX_COMPACTION_PASSES)
    }

    fn place_new_widget<T: GridItem>(&self, items: &[T], size: Size, breakpoint: &str) -> Rect {
        let columns = self.columns(breakpoint);
        let h = size.h.max(1);
        let placed: Vec<Rect> = items.iter().map(GridItem::rect).collect();
        let bottom = scan::bottom(&placed);

        if self.is_mobile(breakpoint) {
            return Rect::new(0, bottom, columns, h);
        }

        let w = size.w.clamp(1, columns);
        if placed.is_empty() {
            return Rect::new(0, 0, w, h);
        }

        scan::scan_rows(
            Rect::new(0, 0, w, h),
            &placed,
            columns,
            bottom.saturating_add(PLACEMENT_ROW_MARGIN),
        )
        .unwrap_or_else(|| {
            tracing::warn!(
                "no free slot for a {}x{} widget on '{}', appending at row {}",
                w,
                h,
                breakpoint,
                bottom
            );
            Rect::new(0, bottom, w, h)
        })
    }

    fn violations<T: GridItem>(&self, items: &[T], breakpoint: &str) -> Vec<Violation> {
        let columns = self.columns(breakpoint);
        let mut violations = vec![];
        let mut seen = HashSet::new();

        for item in items {
            let rect = item.rect();

            if !seen.insert(item.id()) {
                violations.push(Violation::DuplicateId {
                    id: item.id().to_string(),
                });
            }

            if rect.w < 1 || rect.h < 1 {
                violations.push(Violation::NonPositiveSize {
                    id: item.id().to_string(),
                    w: rect.w,
                    h: rect.h,
                });
            }

            if rect.x < 0 || rect.y < 0 || rect.right() > columns {
                violations.push(Violation::OutOfBounds {
                    id: item.id().to_string(),
                    rect,
                    columns,
                });
            }
        }

        for (idx, first) in items.iter().enumerate() {
            for second in &items[idx + 1..] {
                if overlaps(first, second) {
                    violations.push(Violation::Overlap {
                        first: first.id().to_string(),
                        second: second.id().to_string(),
                    });
                }
            }
        }

        violations
    }
}

/// One compaction pass: normalize, place in reading order, stretch rows.
fn compact<T: GridItem>(items: &[T], columns: i32) -> Vec<T> {
    let mut pending: Vec<T> = items
        .iter()
        .map(|item| normalize_to_grid(item, columns))
        .collect();
    sort_canonical(&mut pending);

    let mut placed_rects: Vec<Rect> = Vec::with_capacity(pending.len());
    let mut placed: Vec<T> = Vec::with_capacity(pending.len());

    for item in &pending {
        let rect = scan::place(item.rect(), &placed_rects, columns);
        tracing::trace!(
            "placed '{}' at ({}, {}) with size {}x{}",
            item.id(),
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );

        placed_rects.push(rect);
        placed.push(item.with_rect(rect));
    }

    sort_canonical(&mut placed);
    stretch_trailing(&placed, columns)
}

/// Repeat compaction passes until an arrangement comes back around.
///
/// A fixed point is returned as is. For a longer cycle the smallest member by
/// `(id, rect)` is returned, so tidying that result walks the same cycle and
/// lands on it again. When nothing repeats within `max_passes` the smallest
/// arrangement seen is returned; it is collision-free but a further tidy may
/// still move it.
fn settle<T: GridItem>(items: &[T], columns: i32, breakpoint: &str, max_passes: usize) -> Vec<T> {
    let mut history = vec![compact(items, columns)];

    for pass in 1..max_passes {
        let next = compact(&history[history.len() - 1], columns);

        if let Some(start) = history
            .iter()
            .position(|seen| same_geometry(seen.as_slice(), next.as_slice()))
        {
            // a fixed point is a cycle of length one
            let cycle = &history[start..];
            if cycle.len() > 1 {
                tracing::debug!(
                    "compaction on '{}' cycles through {} arrangements, keeping the smallest",
                    breakpoint,
                    cycle.len()
                );
            }

            tracing::debug!("compacted '{}' in {} passes", breakpoint, pass + 1);

            return smallest(cycle).unwrap_or(next);
        }

        history.push(next);
    }

    tracing::warn!(
        "compaction on '{}' did not settle after {} passes",
        breakpoint,
        max_passes
    );

    smallest(&history).unwrap_or_default()
}

fn smallest<T: GridItem>(arrangements: &[Vec<T>]) -> Option<Vec<T>> {
    arrangements
        .iter()
        .min_by(|a, b| geometry_key(a.as_slice()).cmp(&geometry_key(b.as_slice())))
        .cloned()
}

fn geometry_key<T: GridItem>(items: &[T]) -> Vec<(&str, Rect)> {
    items.iter().map(|item| (item.id(), item.rect())).collect()
}

fn same_geometry<T: GridItem>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(a, b)| a.id() == b.id() && a.rect() == b.rect())
}
