//! Build script for tessel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Views the firmware can start in
const KNOWN_VIEWS: &[&str] = &["Boot", "Clock", "Settings", "System Info"];

/// Keys accepted per section
const DISPLAY_KEYS: &[&str] = &[
    "width",
    "height",
    "spi_hz",
    "invert_colors",
    "backlight_active_high",
];
const BUTTON_KEYS: &[&str] = &["debounce_ms", "active_low"];
const UI_KEYS: &[&str] = &[
    "frame_interval_ms",
    "tick_interval_ms",
    "boot_delay_ms",
    "clock_period_ms",
    "initial_view",
    "clock_start",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml as its configuration.           ║\n\
            ║  Please create one in the tessel-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_ui(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject unknown sections and keys
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        let allowed = match name.as_str() {
            "version" => continue,
            "display" => DISPLAY_KEYS,
            "buttons" => BUTTON_KEYS,
            "ui" => UI_KEYS,
            other => {
                errors.push(format!("unknown section or key '{}'", other));
                continue;
            }
        };

        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !allowed.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };

    for key in ["width", "height"] {
        if let Some(toml::Value::Integer(px)) = display.get(key) {
            if *px <= 0 || *px > 480 {
                errors.push(format!("[display] {} must be 1-480", key));
            }
        }
    }

    if let Some(toml::Value::Integer(hz)) = display.get("spi_hz") {
        if *hz <= 0 || *hz > 62_500_000 {
            errors.push("[display] spi_hz must be 1-62500000".to_string());
        }
    }
}

fn validate_ui(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(ui) = config.get("ui") else {
        return;
    };

    let int = |key: &str| match ui.get(key) {
        Some(toml::Value::Integer(v)) => Some(*v),
        _ => None,
    };

    for key in ["frame_interval_ms", "tick_interval_ms", "clock_period_ms"] {
        if let Some(v) = int(key) {
            if v <= 0 {
                errors.push(format!("[ui] {} must be positive", key));
            }
        }
    }

    let frame = int("frame_interval_ms").unwrap_or(33);
    let tick = int("tick_interval_ms").unwrap_or(1);
    if tick > frame {
        errors.push("[ui] tick_interval_ms must not exceed frame_interval_ms".to_string());
    }

    if let Some(view) = ui.get("initial_view") {
        match view.as_str() {
            Some(name) if KNOWN_VIEWS.contains(&name) => {}
            _ => errors.push(format!(
                "[ui] initial_view must be one of {}",
                KNOWN_VIEWS.join(", ")
            )),
        }
    }

    if let Some(start) = ui.get("clock_start") {
        let valid = start
            .as_str()
            .map(|s| {
                let parts: Vec<_> = s.split(':').map(|p| p.parse::<u8>()).collect();
                matches!(
                    parts.as_slice(),
                    [Ok(h), Ok(m), Ok(s)] if *h < 24 && *m < 60 && *s < 60
                )
            })
            .unwrap_or(false);
        if !valid {
            errors.push("[ui] clock_start must be \"HH:MM:SS\"".to_string());
        }
    }
}
