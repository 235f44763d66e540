//! Authoritative grid item list and its commit operations.
//!
//! # Invariants
//!
//! Outside an active gesture the model always satisfies:
//!
//! 1. Item ids are unique.
//! 2. Every item lies inside the grid (`x + width <= columns`,
//!    `y + height <= rows`).
//! 3. No two items overlap.
//! 4. Every item's size is within its [`SizeBounds`](crate::item::SizeBounds).
//!
//! Commits (`apply_move`, `apply_resize`, `apply_swap`) validate the complete
//! post-commit layout first and either apply every change or none. The only
//! way to break invariant 3 is the documented `(0, 0)` placement fallback
//! taken by [`GridModel::from_specs`] and [`GridModel::insert`] when the grid is
//! full.

use std::fmt;

use dgrid_core::geometry::{CellPos, Rect};

use crate::collision;
use crate::config::GridDimensions;
use crate::item::{GridItem, GridItemSpec, ItemId};
use crate::placement;

/// The placed items of one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    dims: GridDimensions,
    items: Vec<GridItem>,
}

impl GridModel {
    /// Create an empty grid.
    #[must_use]
    pub fn new(dims: GridDimensions) -> Self {
        Self {
            dims,
            items: Vec::new(),
        }
    }

    /// Build a grid from caller-supplied specs, in order.
    ///
    /// Duplicate ids are rejected. An item that collides with one placed before
    /// it is moved to the first free slot for its size.
    pub fn from_specs<'a, I>(dims: GridDimensions, specs: I) -> Result<Self, GridModelError>
    where
        I: IntoIterator<Item = &'a GridItemSpec>,
    {
        let mut model = Self::new(dims);
        for spec in specs {
            model.insert(spec)?;
        }
        Ok(model)
    }

    /// Add a panel.
    ///
    /// The spec's position is honoured when it is free; otherwise (or when the
    /// spec has no position) the item is auto-placed with
    /// [`placement::find_available`].
    pub fn insert(&mut self, spec: &GridItemSpec) -> Result<&GridItem, GridModelError> {
        let mut item = spec.resolve(self.dims);
        if self.contains(&item.id) {
            return Err(GridModelError::DuplicateItem { id: item.id });
        }
        let blocked = collision::collides(&item.rect(), &self.items, &[]);
        if blocked || !spec.has_position() {
            let pos = placement::find_available(
                self.dims,
                &self.items,
                item.width,
                item.height,
                None,
            );
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "grid.item.placed",
                item = %item.id,
                requested_x = item.x,
                requested_y = item.y,
                x = pos.x,
                y = pos.y
            );
            item.x = pos.x;
            item.y = pos.y;
        }
        self.items.push(item);
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Remove a panel, returning it.
    pub fn remove(&mut self, id: &ItemId) -> Option<GridItem> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    #[must_use]
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&GridItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    fn require(&self, id: &ItemId) -> Result<usize, GridModelError> {
        self.index_of(id)
            .ok_or_else(|| GridModelError::UnknownItem { id: id.clone() })
    }

    /// Move an item's top-left corner, keeping its size.
    pub fn apply_move(&mut self, id: &ItemId, pos: CellPos) -> Result<Rect, GridModelError> {
        let index = self.require(id)?;
        let rect = self.items[index].rect().moved_to(pos);
        self.check_placement(id, rect, &[id])?;
        self.items[index].set_rect(rect);
        Ok(rect)
    }

    /// Resize an item in place, keeping its top-left corner.
    pub fn apply_resize(
        &mut self,
        id: &ItemId,
        width: u16,
        height: u16,
    ) -> Result<Rect, GridModelError> {
        let index = self.require(id)?;
        let item = &self.items[index];
        if !item.bounds.admits(width, height) {
            return Err(GridModelError::SizeOutOfRange {
                id: id.clone(),
                width,
                height,
            });
        }
        let rect = item.rect().resized(width, height);
        self.check_placement(id, rect, &[id])?;
        self.items[index].set_rect(rect);
        Ok(rect)
    }

    /// Exchange the top-left corners of two items; sizes are untouched.
    ///
    /// Returns the new rectangles of `first` and `second`.
    pub fn apply_swap(
        &mut self,
        first: &ItemId,
        second: &ItemId,
    ) -> Result<(Rect, Rect), GridModelError> {
        if first == second {
            return Err(GridModelError::SelfSwap { id: first.clone() });
        }
        let a = self.require(first)?;
        let b = self.require(second)?;
        let first_rect = self.items[a].rect().moved_to(self.items[b].position());
        let second_rect = self.items[b].rect().moved_to(self.items[a].position());

        self.check_placement(first, first_rect, &[first, second])?;
        self.check_placement(second, second_rect, &[first, second])?;
        if collision::overlaps(&first_rect, &second_rect) {
            return Err(GridModelError::Collision {
                id: first.clone(),
                other: second.clone(),
            });
        }

        self.items[a].set_rect(first_rect);
        self.items[b].set_rect(second_rect);
        Ok((first_rect, second_rect))
    }

    fn check_placement(
        &self,
        id: &ItemId,
        rect: Rect,
        exclude: &[&ItemId],
    ) -> Result<(), GridModelError> {
        if !rect.fits_within(self.dims.columns, self.dims.rows) {
            return Err(GridModelError::OutOfBounds {
                id: id.clone(),
                rect,
            });
        }
        if let Some(other) = collision::first_collision(&rect, &self.items, exclude) {
            return Err(GridModelError::Collision {
                id: id.clone(),
                other: other.id.clone(),
            });
        }
        Ok(())
    }

    /// Check every steady-state invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), GridModelError> {
        for (index, item) in self.items.iter().enumerate() {
            if !item.bounds.admits(item.width, item.height) {
                return Err(GridModelError::SizeOutOfRange {
                    id: item.id.clone(),
                    width: item.width,
                    height: item.height,
                });
            }
            if !item.rect().fits_within(self.dims.columns, self.dims.rows) {
                return Err(GridModelError::OutOfBounds {
                    id: item.id.clone(),
                    rect: item.rect(),
                });
            }
            for other in &self.items[index + 1..] {
                if other.id == item.id {
                    return Err(GridModelError::DuplicateItem {
                        id: item.id.clone(),
                    });
                }
                if collision::overlaps(&item.rect(), &other.rect()) {
                    return Err(GridModelError::Collision {
                        id: item.id.clone(),
                        other: other.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Grid model failures. A failed commit leaves the model unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridModelError {
    UnknownItem { id: ItemId },
    DuplicateItem { id: ItemId },
    SelfSwap { id: ItemId },
    OutOfBounds { id: ItemId, rect: Rect },
    SizeOutOfRange { id: ItemId, width: u16, height: u16 },
    Collision { id: ItemId, other: ItemId },
}

impl fmt::Display for GridModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem { id } => write!(f, "unknown grid item {id}"),
            Self::DuplicateItem { id } => write!(f, "duplicate grid item id {id}"),
            Self::SelfSwap { id } => write!(f, "cannot swap item {id} with itself"),
            Self::OutOfBounds { id, rect } => write!(
                f,
                "item {id} at ({}, {}) size {}x{} would leave the grid",
                rect.x, rect.y, rect.width, rect.height
            ),
            Self::SizeOutOfRange { id, width, height } => {
                write!(f, "size {width}x{height} is outside the bounds of item {id}")
            }
            Self::Collision { id, other } => write!(f, "item {id} would overlap item {other}"),
        }
    }
}

impl std::error::Error for GridModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDimensions {
        GridDimensions::new(12, 8)
    }

    fn id(raw: &str) -> ItemId {
        ItemId::from(raw)
    }

    fn two_halves() -> GridModel {
        GridModel::from_specs(
            dims(),
            &[
                GridItemSpec::new("a").at(0, 0).size(6, 3),
                GridItemSpec::new("b").at(6, 0).size(6, 3),
            ],
        )
        .expect("valid layout")
    }

    #[test]
    fn from_specs_keeps_free_positions() {
        let model = two_halves();
        assert_eq!(model.len(), 2);
        assert_eq!(model.get(&id("a")).map(GridItem::rect), Some(Rect::new(0, 0, 6, 3)));
        assert_eq!(model.get(&id("b")).map(GridItem::rect), Some(Rect::new(6, 0, 6, 3)));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn colliding_spec_is_relocated() {
        let model = GridModel::from_specs(
            dims(),
            &[
                GridItemSpec::new("a").at(0, 0).size(6, 3),
                GridItemSpec::new("b").at(2, 1).size(6, 3),
            ],
        )
        .expect("valid layout");
        assert_eq!(model.get(&id("b")).map(GridItem::position), Some(CellPos::new(6, 0)));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn unpositioned_specs_are_packed_row_major() {
        let model = GridModel::from_specs(
            dims(),
            &[
                GridItemSpec::new("a"),
                GridItemSpec::new("b"),
                GridItemSpec::new("c"),
            ],
        )
        .expect("valid layout");
        let rects: Vec<Rect> = model.items().iter().map(GridItem::rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 6, 4),
                Rect::new(6, 0, 6, 4),
                Rect::new(0, 4, 6, 4),
            ]
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = GridModel::from_specs(
            dims(),
            &[GridItemSpec::new("a"), GridItemSpec::new("a")],
        )
        .expect_err("duplicate should fail");
        assert_eq!(err, GridModelError::DuplicateItem { id: id("a") });
    }

    #[test]
    fn move_into_free_space() {
        let mut model = two_halves();
        let rect = model
            .apply_move(&id("a"), CellPos::new(0, 5))
            .expect("free target");
        assert_eq!(rect, Rect::new(0, 5, 6, 3));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn colliding_move_leaves_model_untouched() {
        let mut model = two_halves();
        let before = model.clone();
        let err = model
            .apply_move(&id("a"), CellPos::new(3, 0))
            .expect_err("overlaps b");
        assert_eq!(
            err,
            GridModelError::Collision {
                id: id("a"),
                other: id("b"),
            }
        );
        assert_eq!(model, before);
    }

    #[test]
    fn out_of_bounds_move_rejected() {
        let mut model = two_halves();
        let err = model
            .apply_move(&id("a"), CellPos::new(0, 6))
            .expect_err("bottom edge at 9");
        assert!(matches!(err, GridModelError::OutOfBounds { .. }));
    }

    #[test]
    fn resize_respects_bounds_and_neighbours() {
        let mut model = two_halves();
        assert!(matches!(
            model.apply_resize(&id("a"), 2, 3),
            Err(GridModelError::SizeOutOfRange { .. })
        ));
        assert!(matches!(
            model.apply_resize(&id("a"), 7, 3),
            Err(GridModelError::Collision { .. })
        ));
        let rect = model.apply_resize(&id("a"), 6, 5).expect("free below");
        assert_eq!(rect, Rect::new(0, 0, 6, 5));
    }

    #[test]
    fn swap_exchanges_positions_only() {
        let mut model = two_halves();
        model.apply_resize(&id("b"), 6, 5).expect("grow b");
        let (a, b) = model.apply_swap(&id("a"), &id("b")).expect("swap");
        assert_eq!(a, Rect::new(6, 0, 6, 3));
        assert_eq!(b, Rect::new(0, 0, 6, 5));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn swap_twice_restores_layout() {
        let mut model = two_halves();
        let before = model.clone();
        model.apply_swap(&id("a"), &id("b")).expect("swap");
        model.apply_swap(&id("a"), &id("b")).expect("swap back");
        assert_eq!(model, before);
    }

    #[test]
    fn swap_that_would_overlap_is_rejected() {
        let mut model = GridModel::from_specs(
            dims(),
            &[
                GridItemSpec::new("a").at(0, 0).size(4, 2),
                GridItemSpec::new("b").at(4, 0).size(6, 3),
            ],
        )
        .expect("valid layout");
        let before = model.clone();
        let err = model
            .apply_swap(&id("a"), &id("b"))
            .expect_err("b at x=0 is 6 wide and would cover a at x=4");
        assert!(matches!(err, GridModelError::Collision { .. }));
        assert_eq!(model, before);
    }

    #[test]
    fn self_swap_and_unknown_ids_rejected() {
        let mut model = two_halves();
        assert_eq!(
            model.apply_swap(&id("a"), &id("a")),
            Err(GridModelError::SelfSwap { id: id("a") })
        );
        assert_eq!(
            model.apply_move(&id("zz"), CellPos::ORIGIN),
            Err(GridModelError::UnknownItem { id: id("zz") })
        );
    }

    #[test]
    fn remove_returns_item() {
        let mut model = two_halves();
        let removed = model.remove(&id("a")).expect("present");
        assert_eq!(removed.id, id("a"));
        assert!(!model.contains(&id("a")));
        assert!(model.remove(&id("a")).is_none());
    }

    #[test]
    fn full_grid_insert_takes_origin_fallback() {
        let mut model = GridModel::from_specs(
            dims(),
            &[GridItemSpec::new("all").at(0, 0).size(12, 8)],
        )
        .expect("valid layout");
        let placed = model
            .insert(&GridItemSpec::new("late").size(3, 2))
            .expect("insert never fails on space");
        assert_eq!(placed.position(), CellPos::ORIGIN);
        assert!(matches!(
            model.validate(),
            Err(GridModelError::Collision { .. })
        ));
    }

    #[test]
    fn errors_render_readably() {
        let err = GridModelError::Collision {
            id: id("a"),
            other: id("b"),
        };
        assert_eq!(err.to_string(), "item a would overlap item b");
    }
}
