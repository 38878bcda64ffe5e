//! Configuration loading
//!
//! The device configuration is compiled in from `device.toml` (validated by
//! the build script) and parsed at boot.

use defmt::*;

use tessel_core::config::{parse_config, DeviceConfig};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to built-in defaults if the embedded file is rejected.
pub fn load() -> DeviceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("device.toml parse error: {:?}, using defaults", e);
            return DeviceConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Config: {}x{} panel, {} ms frames, initial view {}",
                config.display.width,
                config.display.height,
                config.ui.frame_interval_ms,
                config.ui.initial_view.as_str()
            );
            config
        }
        Err(e) => {
            warn!("device.toml rejected: {:?}, using defaults", e);
            DeviceConfig::default()
        }
    }
}
