use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use super::Rect;

/// Anything that occupies a rectangle on the grid and can be identified
/// within one arrangement.
///
/// Every algorithm in this crate is generic over this trait so that callers
/// can run them over plain [`LayoutItem`]s or over their own widget types.
/// Implementations must treat `with_rect` as a pure copy: the original value
/// is never modified.
pub trait GridItem: Clone {
    fn id(&self) -> &str;
    fn rect(&self) -> Rect;
    #[must_use]
    fn with_rect(&self, rect: Rect) -> Self;
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// A widget's position and size on one breakpoint's grid
pub struct LayoutItem {
    /// Identifier, unique within one arrangement
    #[serde(alias = "i")]
    pub id: String,
    /// Column of the top-left corner
    pub x: i32,
    /// Row of the top-left corner
    pub y: i32,
    /// Width in columns
    pub w: i32,
    /// Height in rows
    pub h: i32,
}

impl LayoutItem {
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
        }
    }
}

impl GridItem for LayoutItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    fn with_rect(&self, rect: Rect) -> Self {
        Self {
            id: self.id.clone(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }
}

impl From<&LayoutItem> for Rect {
    fn from(item: &LayoutItem) -> Self {
        item.rect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Geometry paired with caller-owned data, such as a chart reference
///
/// The payload is carried through compaction untouched.
pub struct Widget<T> {
    #[serde(flatten)]
    pub item: LayoutItem,
    pub payload: T,
}

impl<T> Widget<T> {
    pub const fn new(item: LayoutItem, payload: T) -> Self {
        Self { item, payload }
    }
}

impl<T: Clone> GridItem for Widget<T> {
    fn id(&self) -> &str {
        &self.item.id
    }

    fn rect(&self) -> Rect {
        self.item.rect()
    }

    fn with_rect(&self, rect: Rect) -> Self {
        Self {
            item: self.item.with_rect(rect),
            payload: self.payload.clone(),
        }
    }
}

/// Reading order: top to bottom, then left to right, ties broken by id.
pub fn canonical_order<T: GridItem>(a: &T, b: &T) -> Ordering {
    let (ra, rb) = (a.rect(), b.rect());
    ra.y.cmp(&rb.y)
        .then(ra.x.cmp(&rb.x))
        .then_with(|| a.id().cmp(b.id()))
}

pub fn sort_canonical<T: GridItem>(items: &mut [T]) {
    items.sort_by(canonical_order);
}
