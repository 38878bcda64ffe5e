//! Board-agnostic core of the Tessel firmware
//!
//! This crate owns the view lifecycle and input arbitration:
//!
//! - Handler arbitration table (default vs. view handlers per button)
//! - Views (boot splash, clock, settings, system info) and their timers
//! - View registry (name to constructor)
//! - Display session (the only place the active view changes)
//! - Configuration types and the TOML subset parser
//!
//! Nothing here touches hardware. The firmware crate supplies a
//! [`tessel_display::SurfaceDriver`] and a [`tessel_hal::ClickDevice`].

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod error;
pub mod handlers;
pub mod input;
pub mod registry;
pub mod session;
pub mod timer;
pub mod view;

pub use error::{RegistryError, SwitchError, TimerError};
pub use handlers::{HandlerBinding, HandlerTable};
pub use input::{install_default_handlers, Handler, InputBinder, Navigator};
pub use registry::{Constructor, ViewRegistry};
pub use session::{DisplaySession, SessionState};
pub use timer::{Repeat, TimerControl, TimerId, TimerQueue};
pub use view::View;
