//! Tessel Hardware Abstraction Layer
//!
//! This crate defines the input side of the hardware boundary: the
//! physical buttons, the device that owns their click callbacks, and the
//! debouncer that turns raw pin levels into single-click events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tessel-core (handler arbitration)      │
//! └─────────────────────────────────────────┘
//!                     │ register / unregister
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ClickDevice (this crate - trait)       │
//! └─────────────────────────────────────────┘
//!                     ▲ click(Button)
//!                     │
//! ┌─────────────────────────────────────────┐
//! │  ClickDetector <- InputPin (per button) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input
//! - [`button::ClickDevice`] - One click callback per button

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod debounce;
pub mod gpio;

// Re-export key types at crate root for convenience
pub use button::{BindError, Button, CallbackSlots, ClickDevice, BUTTON_COUNT};
pub use debounce::ClickDetector;
pub use gpio::InputPin;
