#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Two coordinate spaces meet in a grid layout:
//!
//! - **Cell space** ([`Rect`], [`CellPos`]): integer cells, origin at the
//!   top-left cell of the grid. All layout decisions happen here.
//! - **Pixel space** ([`PixelPoint`], [`PixelRect`], [`PixelSize`]): the host's
//!   pointer and container coordinates. Only the coordinate mapper converts
//!   between the two.

use serde::{Deserialize, Serialize};

/// A cell coordinate (column `x`, row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub x: u16,
    pub y: u16,
}

impl CellPos {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Signed per-axis difference `self - origin`.
    #[inline]
    pub const fn delta_from(self, origin: CellPos) -> (i32, i32) {
        (
            self.x as i32 - origin.x as i32,
            self.y as i32 - origin.y as i32,
        )
    }
}

/// An axis-aligned rectangle in cell space.
///
/// Covers the half-open ranges `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left column (inclusive).
    pub x: u16,
    /// Top row (inclusive).
    pub y: u16,
    /// Span in columns.
    pub width: u16,
    /// Span in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size anchored at `pos`.
    #[inline]
    pub const fn at(pos: CellPos, width: u16, height: u16) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn position(&self) -> CellPos {
        CellPos::new(self.x, self.y)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a cell lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, cell: CellPos) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    /// Whether the rectangle fits inside a `columns × rows` grid.
    #[inline]
    pub const fn fits_within(&self, columns: u16, rows: u16) -> bool {
        self.right() <= columns && self.bottom() <= rows
    }

    /// Same size, new top-left corner.
    #[inline]
    pub const fn moved_to(self, pos: CellPos) -> Self {
        Self::new(pos.x, pos.y, self.width, self.height)
    }

    /// Same top-left corner, new size.
    #[inline]
    pub const fn resized(self, width: u16, height: u16) -> Self {
        Self::new(self.x, self.y, width, height)
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// they do not overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }
}

/// A point in host pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

/// A rectangle in host pixel space (e.g. a bounding client rect).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the point lies inside (left/top inclusive, right/bottom exclusive).
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Offset of `point` from the top-left corner.
    #[inline]
    pub fn relative(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(point.x - self.left, point.y - self.top)
    }
}
