//! Grid items and the caller-facing item spec.

use std::fmt;

use dgrid_core::geometry::{CellPos, Rect};
use serde::{Deserialize, Serialize};

use crate::config::GridDimensions;

/// Default width of an item whose spec omits it.
pub const DEFAULT_ITEM_WIDTH: u16 = 6;
/// Default height of an item whose spec omits it.
pub const DEFAULT_ITEM_HEIGHT: u16 = 4;
/// Default resize lower bound on width.
pub const DEFAULT_MIN_WIDTH: u16 = 3;
/// Default resize lower bound on height.
pub const DEFAULT_MIN_HEIGHT: u16 = 2;

/// Stable item identifier, unique within one grid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Resize limits of one item.
///
/// Always reconciled so that `1 <= min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min_width: u16,
    pub min_height: u16,
    pub max_width: u16,
    pub max_height: u16,
}

impl SizeBounds {
    /// Reconcile raw bounds against the grid: minimums land in
    /// `[1, grid dim]`, maximums in `[min, grid dim]`.
    #[must_use]
    pub fn reconcile(
        dims: GridDimensions,
        min_width: Option<u16>,
        min_height: Option<u16>,
        max_width: Option<u16>,
        max_height: Option<u16>,
    ) -> Self {
        let columns = dims.columns.max(1);
        let rows = dims.rows.max(1);
        let min_width = min_width.unwrap_or(DEFAULT_MIN_WIDTH).clamp(1, columns);
        let min_height = min_height.unwrap_or(DEFAULT_MIN_HEIGHT).clamp(1, rows);
        let max_width = max_width.unwrap_or(columns).min(columns).max(min_width);
        let max_height = max_height.unwrap_or(rows).min(rows).max(min_height);
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    /// `max(min, min(max, width))`: the minimum wins a conflict.
    #[must_use]
    pub fn clamp_width(&self, width: i32) -> u16 {
        clamp_span(width, self.min_width, self.max_width)
    }

    /// `max(min, min(max, height))`: the minimum wins a conflict.
    #[must_use]
    pub fn clamp_height(&self, height: i32) -> u16 {
        clamp_span(height, self.min_height, self.max_height)
    }

    #[must_use]
    pub fn admits(&self, width: u16, height: u16) -> bool {
        (self.min_width..=self.max_width).contains(&width)
            && (self.min_height..=self.max_height).contains(&height)
    }
}

fn clamp_span(value: i32, min: u16, max: u16) -> u16 {
    let capped = value.min(i32::from(max));
    // Lands in `[min, max]`, so the conversion cannot fail.
    u16::try_from(capped.max(i32::from(min))).unwrap_or(min)
}

/// One placed panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridItem {
    pub id: ItemId,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    #[serde(flatten)]
    pub bounds: SizeBounds,
}

impl GridItem {
    /// Occupied cell rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub const fn position(&self) -> CellPos {
        CellPos::new(self.x, self.y)
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

/// Caller-supplied description of one panel. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridItemSpec {
    pub id: String,
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub min_width: Option<u16>,
    pub min_height: Option<u16>,
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
}

impl GridItemSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, x: u16, y: u16) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn min_size(mut self, width: u16, height: u16) -> Self {
        self.min_width = Some(width);
        self.min_height = Some(height);
        self
    }

    #[must_use]
    pub fn max_size(mut self, width: u16, height: u16) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    /// Whether the caller pinned a position.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Apply defaults and clamp everything into a valid in-grid item.
    ///
    /// Never fails: malformed bounds and out-of-grid positions are reconciled.
    #[must_use]
    pub fn resolve(&self, dims: GridDimensions) -> GridItem {
        let bounds = SizeBounds::reconcile(
            dims,
            self.min_width,
            self.min_height,
            self.max_width,
            self.max_height,
        );
        let width = bounds.clamp_width(i32::from(self.width.unwrap_or(DEFAULT_ITEM_WIDTH)));
        let height = bounds.clamp_height(i32::from(self.height.unwrap_or(DEFAULT_ITEM_HEIGHT)));
        let x = self.x.unwrap_or(0).min(dims.columns.saturating_sub(width));
        let y = self.y.unwrap_or(0).min(dims.rows.saturating_sub(height));
        GridItem {
            id: ItemId::new(self.id.clone()),
            x,
            y,
            width,
            height,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDimensions {
        GridDimensions::new(12, 8)
    }

    #[test]
    fn bare_spec_uses_defaults() {
        let item = GridItemSpec::new("chart").resolve(dims());
        assert_eq!(item.id.as_str(), "chart");
        assert_eq!(item.rect(), Rect::new(0, 0, 6, 4));
        assert_eq!(
            item.bounds,
            SizeBounds {
                min_width: 3,
                min_height: 2,
                max_width: 12,
                max_height: 8,
            }
        );
    }

    #[test]
    fn min_greater_than_max_lets_min_win() {
        let item = GridItemSpec::new("a")
            .size(4, 4)
            .min_size(5, 3)
            .max_size(2, 2)
            .resolve(dims());
        assert_eq!(item.bounds.min_width, 5);
        assert_eq!(item.bounds.max_width, 5);
        assert_eq!(item.bounds.max_height, 3);
        assert_eq!((item.width, item.height), (5, 3));
    }

    #[test]
    fn undersized_width_is_raised_to_min() {
        let item = GridItemSpec::new("a").size(1, 1).resolve(dims());
        assert_eq!((item.width, item.height), (3, 2));
    }

    #[test]
    fn oversized_item_is_clamped_to_grid() {
        let item = GridItemSpec::new("a")
            .size(40, 40)
            .min_size(30, 30)
            .resolve(dims());
        assert_eq!(item.bounds.min_width, 12);
        assert_eq!(item.bounds.min_height, 8);
        assert_eq!(item.rect(), Rect::new(0, 0, 12, 8));
    }

    #[test]
    fn position_is_pulled_inside_the_grid() {
        let item = GridItemSpec::new("a").at(10, 7).size(6, 3).resolve(dims());
        assert_eq!(item.rect(), Rect::new(6, 5, 6, 3));
        assert!(item.rect().fits_within(12, 8));
    }

    #[test]
    fn clamp_handles_negative_candidates() {
        let bounds = SizeBounds::reconcile(dims(), None, None, None, None);
        assert_eq!(bounds.clamp_width(-7), 3);
        assert_eq!(bounds.clamp_height(100), 8);
        assert!(bounds.admits(3, 2));
        assert!(!bounds.admits(2, 2));
    }

    #[test]
    fn spec_deserializes_with_only_id() {
        let spec: GridItemSpec =
            serde_json::from_str(r#"{"id":"goals","width":4}"#).expect("spec should parse");
        assert_eq!(spec.id, "goals");
        assert_eq!(spec.width, Some(4));
        assert_eq!(spec.height, None);
    }

    #[test]
    fn item_serializes_flat() {
        let item = GridItemSpec::new("a").size(6, 3).resolve(dims());
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["id"], "a");
        assert_eq!(value["min_width"], 3);
        assert_eq!(value["max_height"], 8);
    }
}
