//! Button debouncing
//!
//! Turns sampled pin levels into discrete single-click events. A click is
//! reported when a debounced press is followed by a debounced release.

use crate::gpio::InputPin;

/// Debounced single-click detector for one button
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickDetector {
    /// Time a level must hold before it is accepted (ms)
    debounce_ms: u32,
    /// Button pulls the pin low when pressed
    active_low: bool,
    /// Last accepted (debounced) pressed state
    stable: bool,
    /// Last sampled pressed state
    raw: bool,
    /// Timestamp of the last raw level change (ms)
    last_change_ms: u32,
}

impl ClickDetector {
    /// Create a detector in the released state
    pub const fn new(debounce_ms: u32, active_low: bool) -> Self {
        Self {
            debounce_ms,
            active_low,
            stable: false,
            raw: false,
            last_change_ms: 0,
        }
    }

    /// Sample a pin and report whether a click completed
    pub fn poll<P: InputPin>(&mut self, pin: &P, now_ms: u32) -> bool {
        let pressed = pin.is_active(self.active_low);
        self.update(pressed, now_ms)
    }

    /// Feed one pressed/released sample taken at `now_ms`
    ///
    /// Returns `true` exactly once per debounced press-release cycle.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> bool {
        if pressed != self.raw {
            self.raw = pressed;
            self.last_change_ms = now_ms;
        }

        let settled = now_ms.wrapping_sub(self.last_change_ms) >= self.debounce_ms;
        if settled && self.stable != self.raw {
            self.stable = self.raw;
            // Release edge completes the click
            return !self.stable;
        }

        false
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakePin {
        high: Cell<bool>,
    }

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.high.get()
        }
    }

    #[test]
    fn test_clean_click() {
        let mut det = ClickDetector::new(20, false);

        assert!(!det.update(true, 0));
        assert!(!det.update(true, 20));
        assert!(det.is_pressed());

        assert!(!det.update(false, 100));
        assert!(det.update(false, 120));
        assert!(!det.is_pressed());

        // No second click while released
        assert!(!det.update(false, 200));
    }

    #[test]
    fn test_bounce_rejected() {
        let mut det = ClickDetector::new(20, false);

        // Chatter shorter than the debounce window
        for t in 0..10 {
            assert!(!det.update(t % 2 == 0, t * 3));
        }
        assert!(!det.update(false, 100));
        assert!(!det.is_pressed());
    }

    #[test]
    fn test_release_bounce_single_click() {
        let mut det = ClickDetector::new(10, false);
        det.update(true, 0);
        det.update(true, 10);

        // Release with bounce, settles low at t=34
        assert!(!det.update(false, 30));
        assert!(!det.update(true, 32));
        assert!(!det.update(false, 34));
        assert!(det.update(false, 44));
        assert!(!det.update(false, 60));
    }

    #[test]
    fn test_active_low_pin() {
        let pin = FakePin {
            high: Cell::new(true),
        };
        let mut det = ClickDetector::new(5, true);

        assert!(!det.poll(&pin, 0));
        pin.high.set(false);
        assert!(!det.poll(&pin, 10));
        assert!(!det.poll(&pin, 15));
        assert!(det.is_pressed());
        pin.high.set(true);
        assert!(!det.poll(&pin, 30));
        assert!(det.poll(&pin, 35));
    }

    #[test]
    fn test_timestamp_wraparound() {
        let mut det = ClickDetector::new(10, false);
        let start = u32::MAX - 5;
        det.update(true, start);
        det.update(true, start.wrapping_add(10));
        assert!(det.is_pressed());
        det.update(false, start.wrapping_add(20));
        assert!(det.update(false, start.wrapping_add(30)));
    }
}
