//! Move gesture: live preview with drag-to-swap detection.
//!
//! A [`DragSession`] captures the dragged item at pointer-down and computes a
//! fresh [`ShadowPreview`] for every pointer cell. It only reads the model;
//! the one mutation happens in [`DragSession::commit`] at release.
//!
//! # Preview rules
//!
//! 1. The candidate keeps the grab offset (pointer cell minus item origin at
//!    pointer-down) and is clamped to lie fully inside the grid.
//! 2. Every other item whose overlap with the candidate exceeds the swap
//!    threshold, measured against the candidate's area, is a swap candidate;
//!    the first one in list order wins.
//! 3. With a swap candidate the preview is valid iff the candidate avoids
//!    every third item, the target avoids every third item at the dragged
//!    item's origin, and the exchanged layout (dragged item at the target's
//!    origin, target at the dragged item's origin) is itself legal.
//! 4. Without one, the preview is valid iff the candidate avoids every other
//!    item.

use dgrid_core::geometry::{CellPos, Rect};

use crate::collision;
use crate::item::{GridItem, ItemId};
use crate::model::{GridModel, GridModelError};
use crate::preview::{ShadowPreview, SwapInfo};

/// Result of a committed move gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCommit {
    Moved {
        item: ItemId,
        rect: Rect,
    },
    Swapped {
        item: ItemId,
        rect: Rect,
        target: ItemId,
        target_rect: Rect,
    },
}

/// State captured at pointer-down for one move gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    item_id: ItemId,
    origin: Rect,
    start_cell: CellPos,
    grab_dx: i32,
    grab_dy: i32,
}

impl DragSession {
    /// Capture `id` grabbed at `start_cell`.
    pub fn begin(model: &GridModel, id: &ItemId, start_cell: CellPos) -> Result<Self, GridModelError> {
        let item = model
            .get(id)
            .ok_or_else(|| GridModelError::UnknownItem { id: id.clone() })?;
        let (grab_dx, grab_dy) = start_cell.delta_from(item.position());
        Ok(Self {
            item_id: item.id.clone(),
            origin: item.rect(),
            start_cell,
            grab_dx,
            grab_dy,
        })
    }

    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Item rectangle at pointer-down.
    #[must_use]
    pub const fn origin(&self) -> Rect {
        self.origin
    }

    #[must_use]
    pub const fn start_cell(&self) -> CellPos {
        self.start_cell
    }

    /// Candidate rectangle for the pointer at `cell`, clamped into the grid.
    #[must_use]
    pub fn candidate(&self, model: &GridModel, cell: CellPos) -> Rect {
        let dims = model.dimensions();
        let max_x = i32::from(dims.columns.saturating_sub(self.origin.width));
        let max_y = i32::from(dims.rows.saturating_sub(self.origin.height));
        let x = (i32::from(cell.x) - self.grab_dx).clamp(0, max_x);
        let y = (i32::from(cell.y) - self.grab_dy).clamp(0, max_y);
        // Both lie in [0, u16::MAX] after the clamp.
        self.origin.moved_to(CellPos::new(
            u16::try_from(x).unwrap_or(0),
            u16::try_from(y).unwrap_or(0),
        ))
    }

    /// Preview for the pointer at `cell`.
    #[must_use]
    pub fn preview(&self, model: &GridModel, cell: CellPos, swap_threshold: f64) -> ShadowPreview {
        let candidate = self.candidate(model, cell);
        let others = || model.items().iter().filter(|item| item.id != self.item_id);

        let target = others()
            .find(|item| collision::overlap_ratio(&candidate, &item.rect()) > swap_threshold);

        let (is_valid, swap) = match target {
            Some(target) => (
                self.swap_is_legal(model, candidate, target),
                Some(SwapInfo {
                    target_id: target.id.clone(),
                    target_origin: target.position(),
                }),
            ),
            None => (!collision::collides(&candidate, others(), &[]), None),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "grid.preview",
            item = %self.item_id,
            x = candidate.x,
            y = candidate.y,
            is_valid,
            swap = swap.as_ref().map(|info| info.target_id.as_str())
        );

        ShadowPreview {
            item_id: self.item_id.clone(),
            rect: candidate,
            is_valid,
            mode: None,
            swap,
        }
    }

    fn swap_is_legal(&self, model: &GridModel, candidate: Rect, target: &GridItem) -> bool {
        let dims = model.dimensions();
        let exclude = [&self.item_id, &target.id];
        let target_at_origin = target.rect().moved_to(self.origin.position());
        let dragged_at_target = self.origin.moved_to(target.position());

        !collision::collides(&candidate, model.items(), &exclude)
            && !collision::collides(&target_at_origin, model.items(), &exclude)
            && !collision::collides(&dragged_at_target, model.items(), &exclude)
            && target_at_origin.fits_within(dims.columns, dims.rows)
            && dragged_at_target.fits_within(dims.columns, dims.rows)
            && !collision::overlaps(&target_at_origin, &dragged_at_target)
    }

    /// Apply a valid preview: a swap when it carries [`SwapInfo`], a move
    /// otherwise.
    pub fn commit(
        &self,
        model: &mut GridModel,
        preview: &ShadowPreview,
    ) -> Result<MoveCommit, GridModelError> {
        match &preview.swap {
            Some(swap) => {
                let (rect, target_rect) = model.apply_swap(&self.item_id, &swap.target_id)?;
                Ok(MoveCommit::Swapped {
                    item: self.item_id.clone(),
                    rect,
                    target: swap.target_id.clone(),
                    target_rect,
                })
            }
            None => {
                let rect = model.apply_move(&self.item_id, preview.rect.position())?;
                Ok(MoveCommit::Moved {
                    item: self.item_id.clone(),
                    rect,
                })
            }
        }
    }
}
