//! Grid configuration.
//!
//! [`GridConfig`] carries the grid dimensions, the pixel spacing of the host
//! container, and the two interaction thresholds. Every field has a default so
//! hosts can deserialize partial documents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u16 = 12;
/// Default number of grid rows.
pub const DEFAULT_ROWS: u16 = 8;
/// Default per-side container padding in pixels.
pub const DEFAULT_PADDING_PX: f64 = 8.0;
/// Default gap between adjacent cells in pixels.
pub const DEFAULT_GAP_PX: f64 = 8.0;
/// Overlap ratio (relative to the dragged item's area) that must be exceeded
/// before another item becomes a swap candidate.
pub const DEFAULT_SWAP_THRESHOLD: f64 = 0.3;
/// Fraction of the resize handle, measured from its left and top edges, that
/// selects an axis-locked resize mode.
pub const DEFAULT_HANDLE_ZONE: f64 = 0.3;

/// Discrete grid size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    pub columns: u16,
    pub rows: u16,
}

impl GridDimensions {
    #[must_use]
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.columns as u32 * self.rows as u32
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u16,
    pub rows: u16,
    /// Per-side padding inside the container, in pixels.
    pub padding: f64,
    /// Gap between adjacent cells, in pixels.
    pub gap: f64,
    pub swap_threshold: f64,
    pub handle_zone: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            padding: DEFAULT_PADDING_PX,
            gap: DEFAULT_GAP_PX,
            swap_threshold: DEFAULT_SWAP_THRESHOLD,
            handle_zone: DEFAULT_HANDLE_ZONE,
        }
    }
}

impl GridConfig {
    /// Default configuration with explicit grid size.
    #[must_use]
    pub fn with_size(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.columns, self.rows)
    }

    /// Reject configurations the engine cannot operate on.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(GridConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(GridConfigError::InvalidSpacing {
                field: "padding",
                value: self.padding,
            });
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(GridConfigError::InvalidSpacing {
                field: "gap",
                value: self.gap,
            });
        }
        if !(0.0..1.0).contains(&self.swap_threshold) {
            return Err(GridConfigError::InvalidSwapThreshold {
                value: self.swap_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.handle_zone) {
            return Err(GridConfigError::InvalidHandleZone {
                value: self.handle_zone,
            });
        }
        Ok(())
    }
}

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum GridConfigError {
    EmptyGrid { columns: u16, rows: u16 },
    InvalidSpacing { field: &'static str, value: f64 },
    InvalidSwapThreshold { value: f64 },
    InvalidHandleZone { value: f64 },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { columns, rows } => {
                write!(f, "grid must have at least one cell (got {columns}x{rows})")
            }
            Self::InvalidSpacing { field, value } => {
                write!(f, "{field} must be a finite, non-negative pixel value (got {value})")
            }
            Self::InvalidSwapThreshold { value } => {
                write!(f, "swap threshold must be in [0, 1) (got {value})")
            }
            Self::InvalidHandleZone { value } => {
                write!(f, "handle zone must be in [0, 1] (got {value})")
            }
        }
    }
}

impl std::error::Error for GridConfigError {}
