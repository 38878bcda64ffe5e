//! Tessel - Square Display Firmware
//!
//! Main firmware binary for an RP2040 board with a 240x240 ST7789 panel and
//! four buttons. Shows one full-screen view at a time (boot splash, clock,
//! settings, system info) and routes button clicks to whichever view owns
//! them.
//!
//! Named after the tesserae of a mosaic: small square tiles, each one a
//! complete picture.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod config;
mod display;
mod tasks;

// Heap allocator for view handlers
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 16KB
const HEAP_SIZE: usize = 16 * 1024;

// Scratch buffer for batched panel writes (must live forever)
static PANEL_BUF: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tessel firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Tick first: button debouncing and view timers read it
    spawner.spawn(tasks::tick_task(config.ui.tick_interval_ms)).unwrap();

    // Buttons on GPIO4-7, pulled towards their idle level
    let pull = if config.buttons.active_low {
        Pull::Up
    } else {
        Pull::Down
    };
    let buttons = [
        Input::new(p.PIN_4, pull),
        Input::new(p.PIN_5, pull),
        Input::new(p.PIN_6, pull),
        Input::new(p.PIN_7, pull),
    ];
    spawner
        .spawn(tasks::button_task(buttons, config.buttons))
        .unwrap();

    // Panel on SPI1: SCK=GPIO10, MOSI=GPIO11, CS=GPIO13, DC=GPIO9, RST=GPIO14
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = config.display.spi_hz;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);

    let panel = unwrap!(display::panel::init(
        spi,
        Output::new(p.PIN_13, Level::High),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_14, Level::Low),
        PANEL_BUF.init([0u8; 512]),
        &config.display,
    ));
    info!("Panel initialized");

    // Backlight on GPIO8
    let backlight = Output::new(
        p.PIN_8,
        if config.display.backlight_active_high {
            Level::High
        } else {
            Level::Low
        },
    );

    spawner
        .spawn(tasks::ui_task(panel, backlight, config))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
