//! Error types for view switching, timers and the view registry

use tessel_display::DisplayError;

/// Why a view switch did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchError {
    /// No constructor is registered under the requested name
    ViewNotFound,
    /// The view could not allocate its surface, widgets or timers
    Construction(DisplayError),
    /// The view was built but the driver refused to show it
    Load(DisplayError),
}

impl From<DisplayError> for SwitchError {
    fn from(err: DisplayError) -> Self {
        SwitchError::Construction(err)
    }
}

/// Timer queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Every timer slot is in use
    Full,
}

/// View registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// A constructor with that name is already registered
    Duplicate,
    /// No room for another constructor
    Full,
}
