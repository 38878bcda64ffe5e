//! Bounded surface pool
//!
//! `SurfaceStore` is the in-memory `SurfaceDriver` used by the firmware and
//! by host tests. It holds up to `N` live surfaces and tracks which one is
//! loaded so the renderer knows what to draw.

use crate::backend::{DisplayError, LabelId, SurfaceDriver, SurfaceHandle};
use crate::surface::{GridLayout, LabelStyle, Rgb, Surface};

/// Surface pool with `N` slots
#[derive(Debug)]
pub struct SurfaceStore<const N: usize> {
    slots: [Option<Surface>; N],
    /// Bumped every time a slot is released
    generations: [u16; N],
    /// Surface currently rendered
    loaded: Option<SurfaceHandle>,
    /// Loaded surface changed since the last render
    reload: bool,
}

impl<const N: usize> Default for SurfaceStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SurfaceStore<N> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            generations: [0; N],
            loaded: None,
            reload: false,
        }
    }

    /// Number of live surfaces
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Look up a live surface
    pub fn get(&self, handle: SurfaceHandle) -> Option<&Surface> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index()].as_ref()
    }

    /// Handle of the loaded surface
    pub fn loaded_handle(&self) -> Option<SurfaceHandle> {
        self.loaded
    }

    /// The surface the renderer should show, `None` for a blank display
    pub fn loaded(&self) -> Option<&Surface> {
        self.loaded.and_then(|h| self.get(h))
    }

    /// Check if the display needs to be redrawn
    pub fn needs_redraw(&self) -> bool {
        self.reload || self.loaded().map(Surface::is_dirty).unwrap_or(false)
    }

    /// Clear redraw tracking after the loaded surface has been drawn
    pub fn mark_rendered(&mut self) {
        self.reload = false;
        if let Some(surface) = self.loaded.and_then(|h| self.get_mut(h)) {
            surface.mark_clean();
        }
    }

    fn get_mut(&mut self, handle: SurfaceHandle) -> Option<&mut Surface> {
        if !self.is_live(handle) {
            return None;
        }
        self.slots[handle.index()].as_mut()
    }

    fn live_mut(&mut self, handle: SurfaceHandle) -> Result<&mut Surface, DisplayError> {
        self.get_mut(handle).ok_or(DisplayError::InvalidHandle)
    }
}

impl<const N: usize> SurfaceDriver for SurfaceStore<N> {
    fn create_root_surface(&mut self, name: &str) -> Result<SurfaceHandle, DisplayError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(DisplayError::OutOfMemory)?;
        self.slots[index] = Some(Surface::new(name));
        Ok(SurfaceHandle::new(index as u8, self.generations[index]))
    }

    fn destroy_surface(&mut self, handle: SurfaceHandle) {
        if !self.is_live(handle) {
            return;
        }
        let index = handle.index();
        self.slots[index] = None;
        self.generations[index] = self.generations[index].wrapping_add(1);
        if self.loaded == Some(handle) {
            self.loaded = None;
            self.reload = true;
        }
    }

    fn load_surface(&mut self, handle: SurfaceHandle) -> Result<(), DisplayError> {
        if !self.is_live(handle) {
            return Err(DisplayError::InvalidHandle);
        }
        if self.loaded != Some(handle) {
            self.loaded = Some(handle);
            self.reload = true;
        }
        Ok(())
    }

    fn is_live(&self, handle: SurfaceHandle) -> bool {
        let index = handle.index();
        index < N && self.generations[index] == handle.generation() && self.slots[index].is_some()
    }

    fn add_label(
        &mut self,
        surface: SurfaceHandle,
        text: &str,
        style: LabelStyle,
    ) -> Result<LabelId, DisplayError> {
        let index = self
            .live_mut(surface)?
            .add_label(text, style)
            .ok_or(DisplayError::CapacityExceeded)?;
        Ok(LabelId(index as u8))
    }

    fn set_label_text(
        &mut self,
        surface: SurfaceHandle,
        label: LabelId,
        text: &str,
    ) -> Result<(), DisplayError> {
        if self.live_mut(surface)?.set_label_text(label.0 as usize, text) {
            Ok(())
        } else {
            Err(DisplayError::InvalidHandle)
        }
    }

    fn add_grid(&mut self, surface: SurfaceHandle, layout: GridLayout) -> Result<(), DisplayError> {
        if self.live_mut(surface)?.set_grid(layout) {
            Ok(())
        } else {
            Err(DisplayError::CapacityExceeded)
        }
    }

    fn set_cell_color(
        &mut self,
        surface: SurfaceHandle,
        cell: usize,
        color: Rgb,
    ) -> Result<(), DisplayError> {
        if self.live_mut(surface)?.set_cell(cell, color) {
            Ok(())
        } else {
            Err(DisplayError::InvalidHandle)
        }
    }

    fn fill_cells(&mut self, surface: SurfaceHandle, color: Rgb) -> Result<(), DisplayError> {
        if self.live_mut(surface)?.fill_cells(color) {
            Ok(())
        } else {
            Err(DisplayError::InvalidHandle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_until_full() {
        let mut store: SurfaceStore<2> = SurfaceStore::new();
        store.create_root_surface("A").unwrap();
        store.create_root_surface("B").unwrap();
        assert_eq!(
            store.create_root_surface("C"),
            Err(DisplayError::OutOfMemory)
        );
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut store: SurfaceStore<1> = SurfaceStore::new();
        let old = store.create_root_surface("Old").unwrap();
        store.destroy_surface(old);

        let new = store.create_root_surface("New").unwrap();
        assert_eq!(old.index(), new.index());
        assert!(!store.is_live(old));
        assert!(store.is_live(new));
        assert_eq!(
            store.add_label(old, "x", LabelStyle::default()),
            Err(DisplayError::InvalidHandle)
        );

        // Double destroy is ignored
        store.destroy_surface(old);
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_load_and_redraw() {
        let mut store: SurfaceStore<2> = SurfaceStore::new();
        assert!(!store.needs_redraw());

        let h = store.create_root_surface("Boot").unwrap();
        store.load_surface(h).unwrap();
        assert!(store.needs_redraw());
        assert_eq!(store.loaded().map(Surface::name), Some("Boot"));

        store.mark_rendered();
        assert!(!store.needs_redraw());

        let label = store.add_label(h, "Booting...", LabelStyle::title(20)).unwrap();
        assert!(store.needs_redraw());
        store.mark_rendered();

        store.set_label_text(h, label, "Done").unwrap();
        assert!(store.needs_redraw());
    }

    #[test]
    fn test_destroy_loaded_blanks_display() {
        let mut store: SurfaceStore<2> = SurfaceStore::new();
        let h = store.create_root_surface("Clock").unwrap();
        store.load_surface(h).unwrap();
        store.mark_rendered();

        store.destroy_surface(h);
        assert!(store.loaded().is_none());
        assert!(store.needs_redraw());
        assert_eq!(store.load_surface(h), Err(DisplayError::InvalidHandle));
    }

    #[test]
    fn test_grid_errors() {
        let mut store: SurfaceStore<1> = SurfaceStore::new();
        let h = store.create_root_surface("Grid").unwrap();
        assert_eq!(
            store.fill_cells(h, Rgb::BLACK),
            Err(DisplayError::InvalidHandle)
        );
    }
}
