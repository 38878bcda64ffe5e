//! Configuration type definitions

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum view name length
pub const MAX_VIEW_NAME_LEN: usize = 16;

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Version is not supported by this firmware
    UnsupportedVersion,
    /// Panel width or height is zero
    InvalidPanelSize,
    /// Frame interval is zero
    ZeroFrameInterval,
    /// Tick interval is zero
    ZeroTickInterval,
    /// Tick interval is longer than the frame interval
    TickExceedsFrame,
    /// Clock period is zero
    ZeroClockPeriod,
    /// No initial view named
    EmptyInitialView,
    /// Clock start time is not a valid time of day
    InvalidClockTime,
}

/// Time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Check the fields form a valid 24 h time
    pub fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// SPI clock in Hz
    pub spi_hz: u32,
    /// Panel expects inverted colours
    pub invert_colors: bool,
    /// Backlight is on when its pin is high
    pub backlight_active_high: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            spi_hz: 40_000_000,
            invert_colors: true,
            backlight_active_high: true,
        }
    }
}

/// Button input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Debounce window in ms
    pub debounce_ms: u32,
    /// Buttons pull their pin low when pressed
    pub active_low: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 20,
            active_low: true,
        }
    }
}

/// UI timing and startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Render loop period in ms
    pub frame_interval_ms: u32,
    /// Tick counter period in ms
    pub tick_interval_ms: u32,
    /// Boot splash duration in ms
    pub boot_delay_ms: u32,
    /// Clock update period in ms
    pub clock_period_ms: u32,
    /// First view shown after boot
    pub initial_view: String<MAX_VIEW_NAME_LEN>,
    /// Time the clock starts at
    pub clock_start: ClockTime,
}

impl Default for UiConfig {
    fn default() -> Self {
        let mut initial_view = String::new();
        let _ = initial_view.push_str("Boot");
        Self {
            frame_interval_ms: 33,
            tick_interval_ms: 1,
            boot_delay_ms: 2000,
            clock_period_ms: 1000,
            initial_view,
            clock_start: ClockTime::new(12, 0, 0),
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Config format version
    pub version: u8,
    pub display: DisplayConfig,
    pub buttons: ButtonConfig,
    pub ui: UiConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: DisplayConfig::default(),
            buttons: ButtonConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl DeviceConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion);
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::InvalidPanelSize);
        }

        let ui = &self.ui;
        if ui.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if ui.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if ui.tick_interval_ms > ui.frame_interval_ms {
            return Err(ConfigError::TickExceedsFrame);
        }
        if ui.clock_period_ms == 0 {
            return Err(ConfigError::ZeroClockPeriod);
        }
        if ui.initial_view.is_empty() {
            return Err(ConfigError::EmptyInitialView);
        }
        if !ui.clock_start.is_valid() {
            return Err(ConfigError::InvalidClockTime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DeviceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.ui.initial_view.as_str(), "Boot");
        assert_eq!(config.display.spi_hz, 40_000_000);
    }

    #[test]
    fn test_tick_longer_than_frame() {
        let mut config = DeviceConfig::default();
        config.ui.tick_interval_ms = 50;
        assert_eq!(config.validate(), Err(ConfigError::TickExceedsFrame));
    }

    #[test]
    fn test_invalid_clock_start() {
        let mut config = DeviceConfig::default();
        config.ui.clock_start = ClockTime::new(24, 0, 0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidClockTime));
    }

    #[test]
    fn test_empty_initial_view() {
        let mut config = DeviceConfig::default();
        config.ui.initial_view.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyInitialView));
    }
}
