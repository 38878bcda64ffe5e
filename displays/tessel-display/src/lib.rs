//! Surface driver traits and shared surface types for Tessel
//!
//! This crate provides:
//! - `SurfaceDriver` trait: the rendering side of the hardware boundary
//!   (create, destroy and load root surfaces, edit their widgets)
//! - `Surface`: a retained-mode root surface holding labels and a cell grid
//! - `SurfaceStore`: a bounded surface pool implementing `SurfaceDriver`
//!
//! # Architecture
//!
//! Views never draw pixels. They build a `Surface` through the driver and
//! mutate its widgets; the firmware renderer turns the one loaded surface
//! into pixels on the panel whenever it is dirty.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod store;
pub mod surface;

// Re-export key types
pub use backend::{DisplayError, LabelId, SurfaceDriver, SurfaceHandle};
pub use store::SurfaceStore;
pub use surface::{
    Anchor, CellGrid, FontSize, GridLayout, Label, LabelStyle, Rgb, Surface, LABEL_LEN, MAX_CELLS,
    MAX_LABELS, NAME_LEN,
};
