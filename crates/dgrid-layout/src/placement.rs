//! First-fit placement search.
//!
//! The scan is row-major: `y` from `0` to `rows - height`, and within each row
//! `x` from `0` to `columns - width`. The first position whose rectangle
//! collides with no other item wins, so results are deterministic and biased
//! toward the top-left.

use dgrid_core::geometry::{CellPos, Rect};

use crate::collision;
use crate::config::GridDimensions;
use crate::item::{GridItem, ItemId};

/// First free top-left for a `width × height` rectangle, or `None` when the
/// grid has no room for it.
pub fn find_free_slot<'a, I>(
    dims: GridDimensions,
    items: I,
    width: u16,
    height: u16,
    exclude: Option<&ItemId>,
) -> Option<CellPos>
where
    I: IntoIterator<Item = &'a GridItem>,
    I::IntoIter: Clone,
{
    if width == 0 || height == 0 || width > dims.columns || height > dims.rows {
        return None;
    }
    let items = items.into_iter();
    let excluded: Vec<&ItemId> = exclude.into_iter().collect();
    for y in 0..=dims.rows - height {
        for x in 0..=dims.columns - width {
            let probe = Rect::new(x, y, width, height);
            if !collision::collides(&probe, items.clone(), &excluded) {
                return Some(CellPos::new(x, y));
            }
        }
    }
    None
}

/// Like [`find_free_slot`], but falls back to `(0, 0)` when no free slot exists.
///
/// The fallback position may overlap existing items. Callers that need a
/// guaranteed collision-free result should use [`find_free_slot`] instead.
pub fn find_available<'a, I>(
    dims: GridDimensions,
    items: I,
    width: u16,
    height: u16,
    exclude: Option<&ItemId>,
) -> CellPos
where
    I: IntoIterator<Item = &'a GridItem>,
    I::IntoIter: Clone,
{
    match find_free_slot(dims, items, width, height, exclude) {
        Some(pos) => pos,
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                message = "grid.placement.fallback",
                width,
                height,
                columns = dims.columns,
                rows = dims.rows
            );
            CellPos::ORIGIN
        }
    }
}
