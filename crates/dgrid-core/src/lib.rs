#![forbid(unsafe_code)]

//! Core: geometry and input primitives for the dgrid layout engine.
//!
//! # Role in dgrid
//! `dgrid-core` is the vocabulary layer. It owns the cell-space and pixel-space
//! geometry types and the modifier snapshot that host adapters attach to
//! pointer events. It has no layout policy of its own; `dgrid-layout` builds
//! the grid model and gesture machinery on top of it.

pub mod event;
pub mod geometry;

pub use event::{Modifiers, PointerButton};
pub use geometry::{CellPos, PixelPoint, PixelRect, PixelSize, Rect};
