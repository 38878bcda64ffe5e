//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Tessel configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers: `display`, `buttons`, `ui`
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! Unknown sections and keys are rejected so typos are caught at build time.

use super::types::{ClockTime, DeviceConfig, MAX_VIEW_NAME_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Key is not known in the current section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String value does not fit its buffer
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Buttons,
    Ui,
}

/// Parse TOML configuration into DeviceConfig
///
/// Keys that are not present keep their default values.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match name.trim() {
        "display" => Ok(Section::Display),
        "buttons" => Ok(Section::Buttons),
        "ui" => Ok(Section::Ui),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "version") => config.version = parse_int(value)?,

        (Section::Display, "width") => config.display.width = parse_int(value)?,
        (Section::Display, "height") => config.display.height = parse_int(value)?,
        (Section::Display, "spi_hz") => config.display.spi_hz = parse_int(value)?,
        (Section::Display, "invert_colors") => config.display.invert_colors = parse_bool(value)?,
        (Section::Display, "backlight_active_high") => {
            config.display.backlight_active_high = parse_bool(value)?
        }

        (Section::Buttons, "debounce_ms") => config.buttons.debounce_ms = parse_int(value)?,
        (Section::Buttons, "active_low") => config.buttons.active_low = parse_bool(value)?,

        (Section::Ui, "frame_interval_ms") => config.ui.frame_interval_ms = parse_int(value)?,
        (Section::Ui, "tick_interval_ms") => config.ui.tick_interval_ms = parse_int(value)?,
        (Section::Ui, "boot_delay_ms") => config.ui.boot_delay_ms = parse_int(value)?,
        (Section::Ui, "clock_period_ms") => config.ui.clock_period_ms = parse_int(value)?,
        (Section::Ui, "initial_view") => {
            let name = parse_string(value)?;
            if name.len() > MAX_VIEW_NAME_LEN {
                return Err(ParseError::TooLong);
            }
            config.ui.initial_view.clear();
            config
                .ui
                .initial_view
                .push_str(name)
                .map_err(|_| ParseError::TooLong)?;
        }
        (Section::Ui, "clock_start") => config.ui.clock_start = parse_time(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Split a line into key and value, dropping trailing comments
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an integer value, allowing `_` separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<20> = heapless::String::new();
    for ch in value.chars().filter(|c| *c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a `"HH:MM:SS"` time of day
fn parse_time(value: &str) -> Result<ClockTime, ParseError> {
    let mut parts = parse_string(value)?.split(':');
    let mut next = || -> Result<u8, ParseError> {
        parts
            .next()
            .ok_or(ParseError::InvalidValue)
            .and_then(parse_int)
    };

    let time = ClockTime::new(next()?, next()?, next()?);
    if parts.next().is_some() || !time.is_valid() {
        return Err(ParseError::InvalidValue);
    }
    Ok(time)
}
