//! Pixel ↔ cell coordinate mapping.
//!
//! The host container is laid out as `padding | cell | gap | cell | … | padding`
//! on each axis, so one cell spans
//! `(extent − 2·padding − (n − 1)·gap) / n` pixels.

use dgrid_core::geometry::{CellPos, PixelPoint, PixelRect, PixelSize, Rect};

use crate::config::{GridConfig, GridDimensions};

/// Converts between host pixels and grid cells for one measured container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    container: PixelRect,
    dims: GridDimensions,
    padding: f64,
    gap: f64,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(container: PixelRect, dims: GridDimensions, padding: f64, gap: f64) -> Self {
        Self {
            container,
            dims,
            padding,
            gap,
        }
    }

    #[must_use]
    pub fn from_config(container: PixelRect, config: &GridConfig) -> Self {
        Self::new(container, config.dimensions(), config.padding, config.gap)
    }

    /// Re-measured container bounds (e.g. after a window resize).
    pub fn set_container(&mut self, container: PixelRect) {
        self.container = container;
    }

    #[must_use]
    pub const fn container(&self) -> PixelRect {
        self.container
    }

    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Pixel size of one cell.
    #[must_use]
    pub fn cell_size(&self) -> PixelSize {
        PixelSize {
            width: axis_cell_extent(self.container.width, self.dims.columns, self.padding, self.gap),
            height: axis_cell_extent(self.container.height, self.dims.rows, self.padding, self.gap),
        }
    }

    /// The cell under a pointer position.
    ///
    /// Always returns an in-bounds cell: positions outside the container clamp
    /// to the nearest edge cell.
    #[must_use]
    pub fn pixel_to_cell(&self, point: PixelPoint) -> CellPos {
        let cell = self.cell_size();
        CellPos::new(
            axis_to_cell(
                point.x - self.container.left - self.padding,
                cell.width + self.gap,
                self.dims.columns,
            ),
            axis_to_cell(
                point.y - self.container.top - self.padding,
                cell.height + self.gap,
                self.dims.rows,
            ),
        )
    }

    /// Pixel rectangle covered by a cell-space rectangle (gaps inside the
    /// rectangle included, outer gaps excluded).
    #[must_use]
    pub fn cell_rect_to_pixels(&self, rect: Rect) -> PixelRect {
        let cell = self.cell_size();
        let step_x = cell.width + self.gap;
        let step_y = cell.height + self.gap;
        PixelRect::new(
            self.container.left + self.padding + f64::from(rect.x) * step_x,
            self.container.top + self.padding + f64::from(rect.y) * step_y,
            span_extent(rect.width, cell.width, self.gap),
            span_extent(rect.height, cell.height, self.gap),
        )
    }
}

fn axis_cell_extent(extent: f64, cells: u16, padding: f64, gap: f64) -> f64 {
    if cells == 0 {
        return 0.0;
    }
    let cells_f = f64::from(cells);
    (extent - 2.0 * padding - (cells_f - 1.0) * gap) / cells_f
}

fn axis_to_cell(offset: f64, step: f64, cells: u16) -> u16 {
    let last = cells.saturating_sub(1);
    if !(step > 0.0) || !offset.is_finite() {
        return 0;
    }
    let index = (offset / step).floor();
    if index <= 0.0 {
        0
    } else if index >= f64::from(last) {
        last
    } else {
        // In (0, last), so the truncating cast is exact.
        index as u16
    }
}

fn span_extent(span: u16, cell: f64, gap: f64) -> f64 {
    if span == 0 {
        return 0.0;
    }
    f64::from(span) * cell + f64::from(span - 1) * gap
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 12×8 grid with 50×40 px cells, 8 px padding and gaps.
    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            PixelRect::new(100.0, 50.0, 704.0, 392.0),
            GridDimensions::new(12, 8),
            8.0,
            8.0,
        )
    }

    #[test]
    fn cell_size_subtracts_padding_and_gaps() {
        let size = mapper().cell_size();
        assert_eq!(size.width, 50.0);
        assert_eq!(size.height, 40.0);
    }

    #[test]
    fn pixel_to_cell_inside_container() {
        let m = mapper();
        // Column 2 starts at 100 + 8 + 2·58 = 224; row 1 at 50 + 8 + 48 = 106.
        assert_eq!(m.pixel_to_cell(PixelPoint::new(224.0, 106.0)), CellPos::new(2, 1));
        assert_eq!(m.pixel_to_cell(PixelPoint::new(223.9, 105.9)), CellPos::new(1, 0));
    }

    #[test]
    fn gap_pixels_belong_to_preceding_cell() {
        let m = mapper();
        // 100 + 8 + 50 + 4 lands in the gap after column 0.
        assert_eq!(m.pixel_to_cell(PixelPoint::new(162.0, 60.0)), CellPos::new(0, 0));
    }

    #[test]
    fn outside_positions_clamp_into_grid() {
        let m = mapper();
        assert_eq!(m.pixel_to_cell(PixelPoint::new(-500.0, -500.0)), CellPos::new(0, 0));
        assert_eq!(m.pixel_to_cell(PixelPoint::new(5000.0, 5000.0)), CellPos::new(11, 7));
        assert_eq!(m.pixel_to_cell(PixelPoint::new(f64::NAN, 120.0)), CellPos::new(0, 1));
    }

    #[test]
    fn degenerate_container_maps_to_origin() {
        let m = CoordinateMapper::new(
            PixelRect::new(0.0, 0.0, 0.0, 0.0),
            GridDimensions::new(12, 8),
            8.0,
            8.0,
        );
        assert!(m.cell_size().width < 0.0);
        assert_eq!(m.pixel_to_cell(PixelPoint::new(40.0, 40.0)), CellPos::ORIGIN);
    }

    #[test]
    fn cell_rect_round_trips_through_its_corner() {
        let m = mapper();
        let rect = Rect::new(3, 2, 4, 2);
        let px = m.cell_rect_to_pixels(rect);
        assert_eq!(px.left, 100.0 + 8.0 + 3.0 * 58.0);
        assert_eq!(px.top, 50.0 + 8.0 + 2.0 * 48.0);
        assert_eq!(px.width, 4.0 * 50.0 + 3.0 * 8.0);
        assert_eq!(px.height, 2.0 * 40.0 + 8.0);
        assert_eq!(m.pixel_to_cell(PixelPoint::new(px.left, px.top)), rect.position());
    }

    #[test]
    fn set_container_changes_mapping() {
        let mut m = mapper();
        m.set_container(PixelRect::new(0.0, 0.0, 704.0, 392.0));
        assert_eq!(m.pixel_to_cell(PixelPoint::new(8.0, 8.0)), CellPos::ORIGIN);
    }
}
