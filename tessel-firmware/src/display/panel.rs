//! Panel bring-up

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::ColorInversion;
use mipidsi::Builder;

use tessel_core::config::DisplayConfig;

/// SPI device owning the panel chip select
pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;

/// Initialized ST7789 panel
pub type Panel = mipidsi::Display<SpiInterface<'static, PanelSpi, Output<'static>>, ST7789, Output<'static>>;

/// Panel bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Chip select could not be driven
    ChipSelect,
    /// Controller did not accept the init sequence
    Init,
}

/// Reset and configure the panel
///
/// # Arguments
/// * `spi` - SPI bus wired to the panel
/// * `cs`, `dc`, `rst` - Chip select, data/command and reset pins
/// * `buffer` - Scratch buffer for batched pixel writes
/// * `config` - Panel geometry and colour inversion
pub fn init(
    spi: Spi<'static, SPI1, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
    buffer: &'static mut [u8],
    config: &DisplayConfig,
) -> Result<Panel, PanelError> {
    let device = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| PanelError::ChipSelect)?;
    let interface = SpiInterface::new(device, dc, buffer);

    let inversion = if config.invert_colors {
        ColorInversion::Inverted
    } else {
        ColorInversion::Normal
    };

    Builder::new(ST7789, interface)
        .display_size(config.width, config.height)
        .invert_colors(inversion)
        .reset_pin(rst)
        .init(&mut Delay)
        .map_err(|_| PanelError::Init)
}
