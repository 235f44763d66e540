//! Resize gesture: mode detection, delta-to-size conversion and
//! collision-aware clamping.
//!
//! The item's top-left corner never moves during a resize; only the right and
//! bottom edges follow the pointer.
//!
//! # Clamp pipeline
//!
//! For every pointer cell the candidate size goes through, in order:
//!
//! 1. the mode's delta rule ([`ResizeMode`]);
//! 2. the item's own bounds, `max(min, min(max, size))`;
//! 3. the room left in the grid (`columns − x`, `rows − y`);
//! 4. the collision-aware maximum ([`max_size_without_collision`]).
//!
//! Step 4 may push a size below the item's minimum; such a preview is invalid.

use std::fmt;

use dgrid_core::event::Modifiers;
use dgrid_core::geometry::{CellPos, PixelPoint, PixelRect, Rect};
use serde::{Deserialize, Serialize};

use crate::config::GridDimensions;
use crate::item::{GridItem, ItemId};
use crate::model::{GridModel, GridModelError};
use crate::preview::ShadowPreview;

/// Which dimensions a resize gesture may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    /// Free resize on both axes.
    #[default]
    Both,
    WidthOnly,
    HeightOnly,
    /// Uniform scale of both axes.
    Proportional,
}

impl ResizeMode {
    /// Resolve the mode at pointer-down.
    ///
    /// Modifiers win: Shift is proportional, Alt is width-only, Ctrl/Super is
    /// height-only. Otherwise the grab point inside the handle decides: the
    /// left `zone` fraction is height-only, the top `zone` fraction is
    /// width-only, anything else is free.
    #[must_use]
    pub fn detect(modifiers: Modifiers, grab: Option<HandleGrab>, zone: f64) -> Self {
        if modifiers.contains(Modifiers::SHIFT) {
            return Self::Proportional;
        }
        if modifiers.contains(Modifiers::ALT) {
            return Self::WidthOnly;
        }
        if modifiers.command() {
            return Self::HeightOnly;
        }
        match grab {
            Some(grab) if grab.offset.x < grab.handle_width * zone => Self::HeightOnly,
            Some(grab) if grab.offset.y < grab.handle_height * zone => Self::WidthOnly,
            _ => Self::Both,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::WidthOnly => "width-only",
            Self::HeightOnly => "height-only",
            Self::Proportional => "proportional",
        }
    }

    /// Unclamped candidate size for a cell delta from the start cell.
    #[must_use]
    pub fn apply(self, start_width: u16, start_height: u16, dx: i32, dy: i32) -> (i32, i32) {
        let w = i32::from(start_width);
        let h = i32::from(start_height);
        match self {
            Self::Both => (w + dx, h + dy),
            Self::WidthOnly => (w + dx, h),
            Self::HeightOnly => (w, h + dy),
            Self::Proportional => {
                let (wf, hf) = (f64::from(w.max(1)), f64::from(h.max(1)));
                let (rel_x, rel_y) = (f64::from(dx) / wf, f64::from(dy) / hf);
                let scale = 1.0 + if rel_x.abs() >= rel_y.abs() { rel_x } else { rel_y };
                (round_cells(f64::from(w) * scale), round_cells(f64::from(h) * scale))
            }
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn round_cells(value: f64) -> i32 {
    // Float-to-int `as` saturates.
    value.round() as i32
}

/// Where inside the resize handle the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleGrab {
    /// Pointer offset from the handle's top-left corner.
    pub offset: PixelPoint,
    pub handle_width: f64,
    pub handle_height: f64,
}

impl HandleGrab {
    /// Grab point of `pointer` inside `handle`.
    #[must_use]
    pub fn within(handle: PixelRect, pointer: PixelPoint) -> Self {
        Self {
            offset: handle.relative(pointer),
            handle_width: handle.width,
            handle_height: handle.height,
        }
    }
}

/// Largest size, not exceeding the target, that keeps `item` clear of every
/// other item and inside the grid.
///
/// Width stops at the left edge of any item to the right that shares a row
/// with the grown rectangle; height stops at the top edge of any item below
/// that shares a column. The result may be smaller than the item's minimum.
pub fn max_size_without_collision<'a, I>(
    item: &GridItem,
    target_width: u16,
    target_height: u16,
    dims: GridDimensions,
    items: I,
) -> (u16, u16)
where
    I: IntoIterator<Item = &'a GridItem>,
{
    let mut max_width = target_width.min(dims.columns.saturating_sub(item.x));
    let mut max_height = target_height.min(dims.rows.saturating_sub(item.y));

    for other in items.into_iter().filter(|other| other.id != item.id) {
        let other_rect = other.rect();
        let rows_overlap = other.y < item.y + max_height && other_rect.bottom() > item.y;
        if rows_overlap && other.x >= item.x && other.x < item.x + max_width {
            max_width = other.x - item.x;
        }

        let columns_overlap = other.x < item.x + max_width && other_rect.right() > item.x;
        if columns_overlap && other.y >= item.y && other.y < item.y + max_height {
            max_height = other.y - item.y;
        }
    }

    (max_width, max_height)
}

/// Result of a committed resize gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeCommit {
    pub item: ItemId,
    pub width: u16,
    pub height: u16,
    pub mode: ResizeMode,
}

/// State captured at pointer-down on a resize handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    item_id: ItemId,
    origin: Rect,
    start_cell: CellPos,
    mode: ResizeMode,
}

impl ResizeSession {
    pub fn begin(
        model: &GridModel,
        id: &ItemId,
        start_cell: CellPos,
        mode: ResizeMode,
    ) -> Result<Self, GridModelError> {
        let item = model
            .get(id)
            .ok_or_else(|| GridModelError::UnknownItem { id: id.clone() })?;
        Ok(Self {
            item_id: item.id.clone(),
            origin: item.rect(),
            start_cell,
            mode,
        })
    }

    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    #[must_use]
    pub const fn mode(&self) -> ResizeMode {
        self.mode
    }

    #[must_use]
    pub const fn origin(&self) -> Rect {
        self.origin
    }

    /// Preview for the pointer at `cell`.
    ///
    /// An item removed from the model mid-gesture yields an invalid preview.
    #[must_use]
    pub fn preview(&self, model: &GridModel, cell: CellPos) -> ShadowPreview {
        let Some(item) = model.get(&self.item_id) else {
            return ShadowPreview {
                item_id: self.item_id.clone(),
                rect: self.origin,
                is_valid: false,
                mode: Some(self.mode),
                swap: None,
            };
        };
        let dims = model.dimensions();
        let (dx, dy) = cell.delta_from(self.start_cell);
        let (raw_width, raw_height) =
            self.mode
                .apply(self.origin.width, self.origin.height, dx, dy);

        let width = item
            .bounds
            .clamp_width(raw_width)
            .min(dims.columns.saturating_sub(item.x));
        let height = item
            .bounds
            .clamp_height(raw_height)
            .min(dims.rows.saturating_sub(item.y));
        let (max_width, max_height) =
            max_size_without_collision(item, width, height, dims, model.items());
        let (width, height) = (width.min(max_width), height.min(max_height));
        let is_valid = width >= item.bounds.min_width && height >= item.bounds.min_height;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "grid.preview",
            item = %self.item_id,
            width,
            height,
            mode = self.mode.as_str(),
            is_valid
        );

        ShadowPreview {
            item_id: self.item_id.clone(),
            rect: item.rect().resized(width, height),
            is_valid,
            mode: Some(self.mode),
            swap: None,
        }
    }

    pub fn commit(
        &self,
        model: &mut GridModel,
        preview: &ShadowPreview,
    ) -> Result<ResizeCommit, GridModelError> {
        let rect = model.apply_resize(&self.item_id, preview.rect.width, preview.rect.height)?;
        Ok(ResizeCommit {
            item: self.item_id.clone(),
            width: rect.width,
            height: rect.height,
            mode: self.mode,
        })
    }
}
