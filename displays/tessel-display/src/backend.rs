//! Surface driver trait
//!
//! Defines the interface between views and the rendering engine.

use crate::surface::{GridLayout, LabelStyle, Rgb};

/// Surface driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Handle refers to a surface or widget that no longer exists
    InvalidHandle,
    /// No room left to allocate another surface
    OutOfMemory,
    /// Surface cannot hold another widget
    CapacityExceeded,
    /// Communication error with the panel
    Communication,
}

/// Handle to a root surface owned by a view
///
/// Handles carry a generation so a stale handle to a released slot never
/// aliases a newer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfaceHandle {
    index: u8,
    generation: u16,
}

impl SurfaceHandle {
    /// Create a handle (drivers only)
    pub const fn new(index: u8, generation: u16) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the driver
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when the handle was issued
    pub const fn generation(&self) -> u16 {
        self.generation
    }
}

/// Label position inside its surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LabelId(pub u8);

/// Surface driver trait
///
/// Provides a hardware-agnostic interface for building and showing root
/// surfaces. Exactly one surface is loaded (rendered) at a time.
pub trait SurfaceDriver {
    /// Allocate a new, empty root surface
    fn create_root_surface(&mut self, name: &str) -> Result<SurfaceHandle, DisplayError>;

    /// Release a surface and all of its widgets
    ///
    /// Stale handles are ignored. Releasing the loaded surface leaves the
    /// display blank until another surface is loaded.
    fn destroy_surface(&mut self, handle: SurfaceHandle);

    /// Make a surface the one that is rendered
    fn load_surface(&mut self, handle: SurfaceHandle) -> Result<(), DisplayError>;

    /// Check whether a handle still refers to a live surface
    fn is_live(&self, handle: SurfaceHandle) -> bool;

    /// Add a text label to a surface
    fn add_label(
        &mut self,
        surface: SurfaceHandle,
        text: &str,
        style: LabelStyle,
    ) -> Result<LabelId, DisplayError>;

    /// Replace the text of a label
    fn set_label_text(
        &mut self,
        surface: SurfaceHandle,
        label: LabelId,
        text: &str,
    ) -> Result<(), DisplayError>;

    /// Attach a cell grid to a surface (one per surface)
    fn add_grid(&mut self, surface: SurfaceHandle, layout: GridLayout) -> Result<(), DisplayError>;

    /// Paint one grid cell
    fn set_cell_color(
        &mut self,
        surface: SurfaceHandle,
        cell: usize,
        color: Rgb,
    ) -> Result<(), DisplayError>;

    /// Paint every grid cell
    fn fill_cells(&mut self, surface: SurfaceHandle, color: Rgb) -> Result<(), DisplayError>;
}
