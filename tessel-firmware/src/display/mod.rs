//! ST7789 panel and surface rendering
//!
//! The panel is driven over blocking SPI through `mipidsi`. The renderer
//! turns the loaded `Surface` into pixels with `embedded-graphics` whenever
//! the surface store reports it dirty.

pub mod panel;
pub mod renderer;

pub use panel::{Panel, PanelError};
pub use renderer::Renderer;
