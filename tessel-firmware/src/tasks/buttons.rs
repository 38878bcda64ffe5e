//! Button polling task
//!
//! Samples the four button pins, debounces them and forwards completed
//! clicks to the UI task.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use tessel_core::config::ButtonConfig;
use tessel_hal::{Button, ClickDetector, InputPin, BUTTON_COUNT};

use super::tick;
use crate::channels::CLICK_CHANNEL;

/// Pin sampling period
const POLL_INTERVAL_MS: u64 = 5;

/// Board button pin
struct ButtonPin(Input<'static>);

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Button task - polls pins and sends clicks on `CLICK_CHANNEL`
#[embassy_executor::task]
pub async fn button_task(pins: [Input<'static>; BUTTON_COUNT], config: ButtonConfig) {
    info!(
        "Button task started (debounce {} ms, active_low={})",
        config.debounce_ms, config.active_low
    );

    let pins = pins.map(ButtonPin);
    let mut detectors = [ClickDetector::new(config.debounce_ms, config.active_low); BUTTON_COUNT];
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;
        let now = tick::now_ms();

        for (index, (pin, detector)) in pins.iter().zip(detectors.iter_mut()).enumerate() {
            if !detector.poll(pin, now) {
                continue;
            }
            let Some(button) = Button::from_index(index) else {
                continue;
            };
            debug!("Button {} clicked", button.number());
            if CLICK_CHANNEL.try_send(button).is_err() {
                warn!("Click queue full, dropping button {}", button.number());
            }
        }
    }
}
