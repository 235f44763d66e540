#![forbid(unsafe_code)]

//! Interactive grid layout engine.
//!
//! Panels live on a discrete `columns × rows` grid. The user drags a panel by
//! its body (moving it, or swapping it with a panel it mostly covers) and
//! resizes it by its handle (free, width-only, height-only or proportional,
//! with growth stopped at neighbouring panels).
//!
//! # Layers
//!
//! - [`coords::CoordinateMapper`] converts host pixels to cells and back.
//! - [`collision`] and [`placement`] answer geometric questions.
//! - [`model::GridModel`] owns the items and applies validated commits.
//! - [`drag::DragSession`] and [`resize::ResizeSession`] compute live
//!   [`ShadowPreview`]s without touching the model.
//! - [`engine::GridLayoutManager`] runs the `Idle / ActiveMove / ActiveResize`
//!   machine, commits on release and notifies [`LayoutObserver`]s.
//! - [`render::RenderPlan`] is the snapshot a host renderer paints.
//!
//! # Example
//!
//! ```
//! use dgrid_core::geometry::{PixelPoint, PixelRect, Rect};
//! use dgrid_layout::{GridConfig, GridInputEvent, GridItemSpec, GridLayoutManager, ItemId, PointerPress};
//!
//! let mut grid = GridLayoutManager::new(
//!     GridConfig::default(),
//!     PixelRect::new(0.0, 0.0, 704.0, 392.0),
//!     &[
//!         GridItemSpec::new("a").at(0, 0).size(6, 3),
//!         GridItemSpec::new("b").at(6, 0).size(6, 3),
//!     ],
//! )?;
//!
//! // Drag `a` from cell (0, 0) onto cell (6, 0): it swaps with `b`.
//! grid.handle_event(&GridInputEvent::PointerDown(PointerPress::body(
//!     "a",
//!     PixelPoint::new(20.0, 20.0),
//! )));
//! grid.handle_event(&GridInputEvent::PointerUp {
//!     position: PixelPoint::new(370.0, 20.0),
//! });
//!
//! let b = grid.model().get(&ItemId::from("b")).map(|item| item.rect());
//! assert_eq!(b, Some(Rect::new(0, 0, 6, 3)));
//! # Ok::<(), dgrid_layout::GridLayoutError>(())
//! ```
//!
//! # Feature flags
//!
//! - `tracing`: structured `grid.*` events for gestures, previews and commits.

pub mod collision;
pub mod config;
pub mod coords;
pub mod drag;
pub mod engine;
pub mod item;
pub mod model;
pub mod placement;
pub mod preview;
pub mod render;
pub mod resize;

pub use config::{GridConfig, GridConfigError, GridDimensions};
pub use coords::CoordinateMapper;
pub use drag::{DragSession, MoveCommit};
pub use engine::{
    CancelReason, DiscardReason, GestureCapture, GestureEffect, GesturePhase, GestureTransition,
    GridCommit, GridInputEvent, GridLayoutError, GridLayoutManager, Grip, LayoutObserver,
    NoopReason, PointerPress,
};
pub use item::{GridItem, GridItemSpec, ItemId, SizeBounds};
pub use model::{GridModel, GridModelError};
pub use preview::{ShadowPreview, SwapInfo};
pub use render::{RenderPlan, RenderedItem, RenderedPreview};
pub use resize::{HandleGrab, ResizeCommit, ResizeMode, ResizeSession};
