//! Axis-aligned collision tests in cell space.

use dgrid_core::geometry::Rect;

use crate::item::{GridItem, ItemId};

/// True iff the two rectangles overlap on both axes.
///
/// Edges are half-open, so rectangles that merely touch do not overlap.
#[inline]
#[must_use]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    let horizontal = !(a.x >= b.right() || a.right() <= b.x);
    let vertical = !(a.y >= b.bottom() || a.bottom() <= b.y);
    horizontal && vertical
}

/// Intersection area divided by the area of `subject`.
///
/// Not symmetric: the denominator is always `subject`'s area. Swap detection
/// passes the dragged item's candidate rectangle as `subject`. An empty
/// `subject` yields `0.0`.
#[must_use]
pub fn overlap_ratio(subject: &Rect, other: &Rect) -> f64 {
    let area = subject.area();
    if area == 0 {
        return 0.0;
    }
    f64::from(subject.intersection(other).area()) / f64::from(area)
}

/// First item (in list order) whose rectangle overlaps `rect`, skipping every
/// id in `exclude`.
pub fn first_collision<'a, I>(rect: &Rect, items: I, exclude: &[&ItemId]) -> Option<&'a GridItem>
where
    I: IntoIterator<Item = &'a GridItem>,
{
    items
        .into_iter()
        .filter(|item| !exclude.contains(&&item.id))
        .find(|item| overlaps(rect, &item.rect()))
}

/// Whether `rect` overlaps any item not listed in `exclude`.
pub fn collides<'a, I>(rect: &Rect, items: I, exclude: &[&ItemId]) -> bool
where
    I: IntoIterator<Item = &'a GridItem>,
{
    first_collision(rect, items, exclude).is_some()
}
