//! Device configuration
//!
//! Configuration is compiled into the firmware as TOML and parsed at boot
//! with the minimal parser in [`parse`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
