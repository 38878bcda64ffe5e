//! GPIO pin abstractions
//!
//! Provides the digital input trait the button debouncer reads from.
//! Chip-specific code wraps its own pin type in an implementation.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Check if the pin is in its active state
    ///
    /// Buttons wired to ground with a pull-up are active-low.
    fn is_active(&self, active_low: bool) -> bool {
        if active_low {
            self.is_low()
        } else {
            self.is_high()
        }
    }
}
