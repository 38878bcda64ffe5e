//! Tick task for time-based updates
//!
//! Advances the global millisecond counter that drives debouncing and view
//! timers. Started once at boot and never stopped.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::AtomicU32;

/// Milliseconds since the tick task started (wraps after ~49 days)
static TICK_MS: AtomicU32 = AtomicU32::new(0);

/// Current tick count in milliseconds
pub fn now_ms() -> u32 {
    TICK_MS.load(Ordering::Relaxed)
}

/// Tick task - advances the counter every `interval_ms`
#[embassy_executor::task]
pub async fn tick_task(interval_ms: u32) {
    info!("Tick task started ({} ms)", interval_ms);

    let interval_ms = interval_ms.max(1);
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;
        TICK_MS.fetch_add(interval_ms, Ordering::Relaxed);
    }
}
