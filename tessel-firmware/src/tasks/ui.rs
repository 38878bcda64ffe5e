//! UI task
//!
//! Owns the display session. Every handler dispatch, timer delivery and
//! view switch runs here, one at a time, so the arbitration table and the
//! active view are never touched from two contexts.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Timer};

use tessel_core::config::DeviceConfig;
use tessel_core::{install_default_handlers, DisplaySession, Handler, ViewRegistry};
use tessel_display::SurfaceStore;
use tessel_hal::{Button, CallbackSlots, BUTTON_COUNT};

use super::tick;
use crate::channels::CLICK_CHANNEL;
use crate::display::{Panel, Renderer};

/// Surface slots (one live view plus headroom)
const SURFACE_SLOTS: usize = 2;

type Session = DisplaySession<SurfaceStore<SURFACE_SLOTS>, CallbackSlots<Handler, BUTTON_COUNT>>;

/// UI task - dispatches clicks, runs view timers and renders
///
/// # Arguments
/// * `panel` - Initialized panel
/// * `backlight` - Held for the lifetime of the task so the backlight stays on
/// * `config` - Device configuration
#[embassy_executor::task]
pub async fn ui_task(mut panel: Panel, _backlight: Output<'static>, config: DeviceConfig) {
    info!("UI task started");

    let mut session: Session = DisplaySession::new(
        SurfaceStore::new(),
        CallbackSlots::new(),
        ViewRegistry::with_builtin(),
        config.ui.clone(),
    );
    install_default_handlers(session.handlers_mut());

    if let Err(e) = session.switch_to(config.ui.initial_view.as_str()) {
        error!("Initial view {} failed: {:?}", config.ui.initial_view.as_str(), e);
    }

    let renderer = Renderer::new(config.display.width, config.display.height);
    let frame = Duration::from_millis(config.ui.frame_interval_ms as u64);
    let mut last_ms = tick::now_ms();

    loop {
        // Wake early for clicks so handlers run without a frame of latency
        if let Either::First(button) = select(CLICK_CHANNEL.receive(), Timer::after(frame)).await {
            dispatch(&mut session, button);
            while let Ok(button) = CLICK_CHANNEL.try_receive() {
                dispatch(&mut session, button);
            }
        }

        let now_ms = tick::now_ms();
        let elapsed = now_ms.wrapping_sub(last_ms);
        last_ms = now_ms;
        if let Err(e) = session.run_timers(elapsed) {
            warn!("Timer-driven switch failed: {:?}", e);
        }

        if session.surfaces().needs_redraw() {
            if renderer.draw(&mut panel, session.surfaces().loaded()).is_err() {
                warn!("Panel write failed");
            }
            session.surfaces_mut().mark_rendered();
        }
    }
}

fn dispatch(session: &mut Session, button: Button) {
    trace!("Dispatching button {}", button.number());
    if let Err(e) = session.handle_click(button.index()) {
        warn!("Button {} switch failed: {:?}", button.number(), e);
    }
}
