//! View registry
//!
//! Maps view names to constructors. Every lookup builds a brand-new view;
//! nothing is cached between switches.

use heapless::Vec;
use tessel_display::{DisplayError, SurfaceDriver};

use crate::error::{RegistryError, SwitchError};
use crate::view::{BootView, BuildContext, ClockView, SettingsView, SystemInfoView, View};

/// Maximum registered views
pub const MAX_VIEWS: usize = 8;

/// Builds a view from the session's resources
pub type Constructor<S> = fn(&mut BuildContext<'_, S>) -> Result<View, DisplayError>;

/// Name to constructor table
pub struct ViewRegistry<S> {
    entries: Vec<(&'static str, Constructor<S>), MAX_VIEWS>,
}

impl<S: SurfaceDriver> Default for ViewRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SurfaceDriver> ViewRegistry<S> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a registry holding the built-in views
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let builtin: [(&'static str, Constructor<S>); 4] = [
            (BootView::NAME, View::boot::<S>),
            (ClockView::NAME, View::clock::<S>),
            (SettingsView::NAME, View::settings::<S>),
            (SystemInfoView::NAME, View::system_info::<S>),
        ];
        for (name, constructor) in builtin {
            // Names are distinct and fit the table
            let _ = registry.register(name, constructor);
        }
        registry
    }

    /// Add a constructor under `name`
    pub fn register(
        &mut self,
        name: &'static str,
        constructor: Constructor<S>,
    ) -> Result<(), RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::Duplicate);
        }
        self.entries
            .push((name, constructor))
            .map_err(|_| RegistryError::Full)
    }

    /// Check if a view is registered
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered view names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Build a fresh instance of the named view
    pub fn create(&self, name: &str, ctx: &mut BuildContext<'_, S>) -> Result<View, SwitchError> {
        let constructor = self.lookup(name).ok_or(SwitchError::ViewNotFound)?;
        Ok(constructor(ctx)?)
    }

    fn lookup(&self, name: &str) -> Option<Constructor<S>> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, constructor)| *constructor)
    }
}
