//! Clock view
//!
//! A 5x12 grid of rounded cells above an `HH:MM:SS` label. Every clock
//! period the time advances one second and the next cell is painted from
//! the current palette; once every cell is painted the grid is cleared.

use alloc::rc::Rc;
use core::fmt::Write;
use core::sync::atomic::Ordering;

use heapless::String;
use portable_atomic::AtomicU8;
use tessel_display::{
    Anchor, DisplayError, FontSize, GridLayout, LabelId, LabelStyle, Rgb, SurfaceDriver,
};
use tessel_hal::Button;

use super::{BuildContext, SettingsView, ViewResources};
use crate::config::ClockTime;
use crate::input::{InputBinder, Navigator};
use crate::timer::{Repeat, TimerId};

/// Grid geometry
pub const CLOCK_GRID: GridLayout = GridLayout {
    rows: 5,
    cols: 12,
    cell_size: 10,
    spacing: 3,
    radius: 3,
    padding: 12,
    anchor: Anchor::Center,
    offset: (0, -30),
    background: Rgb::from_hex(0xDDDDDD),
    border: Rgb::BLACK,
};

const TIME_STYLE: LabelStyle = LabelStyle {
    font: FontSize::Large,
    color: Rgb::BLACK,
    anchor: Anchor::Center,
    offset: (0, 60),
};

/// Cell colour palettes, cycled with button 3
const PALETTES: [[Rgb; 4]; 3] = [
    // Primary
    [
        Rgb::from_hex(0xE53935),
        Rgb::from_hex(0x43A047),
        Rgb::from_hex(0x1E88E5),
        Rgb::from_hex(0xFDD835),
    ],
    // Ocean
    [
        Rgb::from_hex(0x006064),
        Rgb::from_hex(0x00ACC1),
        Rgb::from_hex(0x4DD0E1),
        Rgb::from_hex(0x1A237E),
    ],
    // Greyscale
    [
        Rgb::from_hex(0x212121),
        Rgb::from_hex(0x616161),
        Rgb::from_hex(0x9E9E9E),
        Rgb::from_hex(0xBDBDBD),
    ],
];

/// Time and palette shared between the clock view and its handlers
#[derive(Debug)]
pub struct ClockState {
    hours: AtomicU8,
    minutes: AtomicU8,
    seconds: AtomicU8,
    palette: AtomicU8,
}

impl ClockState {
    pub fn new(start: ClockTime) -> Self {
        Self {
            hours: AtomicU8::new(start.hours),
            minutes: AtomicU8::new(start.minutes),
            seconds: AtomicU8::new(start.seconds),
            palette: AtomicU8::new(0),
        }
    }

    /// Current time
    pub fn time(&self) -> ClockTime {
        ClockTime {
            hours: self.hours.load(Ordering::Relaxed),
            minutes: self.minutes.load(Ordering::Relaxed),
            seconds: self.seconds.load(Ordering::Relaxed),
        }
    }

    /// Advance by one second, wrapping at 24 h
    pub fn advance(&self) {
        let mut t = self.time();
        t.seconds += 1;
        if t.seconds >= 60 {
            t.seconds = 0;
            t.minutes += 1;
        }
        if t.minutes >= 60 {
            t.minutes = 0;
            t.hours += 1;
        }
        if t.hours >= 24 {
            t.hours = 0;
        }
        self.hours.store(t.hours, Ordering::Relaxed);
        self.minutes.store(t.minutes, Ordering::Relaxed);
        self.seconds.store(t.seconds, Ordering::Relaxed);
    }

    /// Index of the active palette
    pub fn palette(&self) -> usize {
        self.palette.load(Ordering::Relaxed) as usize
    }

    /// Switch to the next palette
    pub fn cycle_palette(&self) {
        let next = (self.palette() + 1) % PALETTES.len();
        self.palette.store(next as u8, Ordering::Relaxed);
    }
}

/// Format a time as `HH:MM:SS`
pub fn format_time(t: ClockTime) -> String<8> {
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}:{:02}", t.hours, t.minutes, t.seconds);
    out
}

#[derive(Debug)]
pub struct ClockView {
    pub(super) resources: ViewResources,
    state: Rc<ClockState>,
    time_label: LabelId,
    tick_timer: TimerId,
    next_cell: usize,
    cell_count: usize,
    /// xorshift32 state
    rng: u32,
}

impl ClockView {
    pub const NAME: &'static str = "Clock";

    pub fn build<S: SurfaceDriver>(ctx: &mut BuildContext<'_, S>) -> Result<Self, DisplayError> {
        let start = ctx.config.clock_start;
        let (resources, (time_label, tick_timer)) =
            ViewResources::assemble(ctx, Self::NAME, |ctx, res| {
                let surface = res.surface();
                ctx.surfaces.add_grid(surface, CLOCK_GRID)?;
                let label = ctx
                    .surfaces
                    .add_label(surface, &format_time(start), TIME_STYLE)?;
                let timer =
                    res.start_timer(ctx.timers, ctx.config.clock_period_ms, Repeat::Forever)?;
                Ok((label, timer))
            })?;

        let seed = 0x9E37_79B9
            ^ ((start.hours as u32) << 16 | (start.minutes as u32) << 8 | start.seconds as u32);
        Ok(Self {
            resources,
            state: Rc::new(ClockState::new(start)),
            time_label,
            tick_timer,
            next_cell: 0,
            cell_count: CLOCK_GRID.cell_count(),
            rng: seed | 1,
        })
    }

    /// Shared time and palette state
    pub fn state(&self) -> &Rc<ClockState> {
        &self.state
    }

    /// Cells painted since the grid was last cleared
    pub fn painted_cells(&self) -> usize {
        self.next_cell
    }

    /// Button 1 logs, button 3 cycles the palette, button 4 opens settings
    pub(super) fn register_inputs(&self, binder: &mut dyn InputBinder) {
        binder.register_view_handler(
            Button::One,
            Rc::new(|_: &mut Navigator| info!("clock mode")),
        );

        let state = self.state.clone();
        binder.register_view_handler(
            Button::Three,
            Rc::new(move |_: &mut Navigator| {
                state.cycle_palette();
                info!("clock palette {}", state.palette());
            }),
        );

        binder.register_view_handler(
            Button::Four,
            Rc::new(|nav: &mut Navigator| nav.switch_to(SettingsView::NAME)),
        );
    }

    pub(super) fn on_timer<S: SurfaceDriver>(&mut self, id: TimerId, surfaces: &mut S) {
        if id != self.tick_timer {
            return;
        }

        self.state.advance();
        let surface = self.resources.surface();
        let text = format_time(self.state.time());
        if let Err(e) = surfaces.set_label_text(surface, self.time_label, &text) {
            warn!("clock: label update failed: {:?}", e);
        }

        if let Err(e) = self.paint_next_cell(surfaces) {
            warn!("clock: grid update failed: {:?}", e);
        }
    }

    fn paint_next_cell<S: SurfaceDriver>(&mut self, surfaces: &mut S) -> Result<(), DisplayError> {
        let surface = self.resources.surface();
        if self.next_cell >= self.cell_count {
            surfaces.fill_cells(surface, Rgb::WHITE)?;
            self.next_cell = 0;
        }

        let palette = &PALETTES[self.state.palette() % PALETTES.len()];
        let color = palette[(self.next_random() % palette.len() as u32) as usize];
        surfaces.set_cell_color(surface, self.next_cell, color)?;
        self.next_cell += 1;
        Ok(())
    }

    fn next_random(&mut self) -> u32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        x
    }
}
