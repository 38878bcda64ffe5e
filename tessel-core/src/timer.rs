//! View-owned timers
//!
//! A bounded queue of software timers driven by elapsed milliseconds.
//! Views create timers while they are built and cancel them before their
//! surface is released. Ids carry a generation, so a cancelled or expired
//! id never fires again even if its slot is reused.

use heapless::Vec;

use crate::error::TimerError;

/// Maximum concurrently running timers
pub const MAX_TIMERS: usize = 8;

/// How many times a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeat {
    /// Fire every period until cancelled
    Forever,
    /// Fire this many times, then remove the timer
    ///
    /// `Times(0)` behaves like `Times(1)`.
    Times(u32),
}

/// Handle to a timer in a [`TimerQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerId {
    slot: u8,
    generation: u16,
}

#[derive(Debug, Clone, Copy)]
struct TimerSlot {
    period_ms: u32,
    remaining_ms: u32,
    repeat: Repeat,
}

/// Bounded timer queue
#[derive(Debug)]
pub struct TimerQueue {
    slots: [Option<TimerSlot>; MAX_TIMERS],
    generations: [u16; MAX_TIMERS],
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_TIMERS],
            generations: [0; MAX_TIMERS],
        }
    }

    /// Start a timer that first fires after `period_ms`
    ///
    /// A zero period is treated as 1 ms.
    pub fn create(&mut self, period_ms: u32, repeat: Repeat) -> Result<TimerId, TimerError> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(TimerError::Full)?;

        let period_ms = period_ms.max(1);
        let repeat = match repeat {
            Repeat::Times(0) => Repeat::Times(1),
            other => other,
        };
        self.slots[slot] = Some(TimerSlot {
            period_ms,
            remaining_ms: period_ms,
            repeat,
        });

        Ok(TimerId {
            slot: slot as u8,
            generation: self.generations[slot],
        })
    }

    /// Stop a timer
    ///
    /// Returns `false` if the id was already cancelled or expired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if !self.is_active(id) {
            return false;
        }
        self.release(id.slot as usize);
        true
    }

    /// Check if a timer is still running
    pub fn is_active(&self, id: TimerId) -> bool {
        let slot = id.slot as usize;
        slot < MAX_TIMERS && self.generations[slot] == id.generation && self.slots[slot].is_some()
    }

    /// Number of running timers
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Advance time and collect the timers that fired
    ///
    /// A timer fires at most once per call; missed periods are folded into
    /// the next deadline. Timers that used up their repeat count are removed
    /// before this returns.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<TimerId, MAX_TIMERS> {
        let mut fired = Vec::new();

        for index in 0..MAX_TIMERS {
            let Some(timer) = self.slots[index].as_mut() else {
                continue;
            };

            if elapsed_ms < timer.remaining_ms {
                timer.remaining_ms -= elapsed_ms;
                continue;
            }

            let overshoot = elapsed_ms - timer.remaining_ms;
            timer.remaining_ms = timer.period_ms - (overshoot % timer.period_ms);

            let expired = match &mut timer.repeat {
                Repeat::Forever => false,
                Repeat::Times(n) => {
                    *n -= 1;
                    *n == 0
                }
            };

            // Capacity equals the slot count
            let _ = fired.push(TimerId {
                slot: index as u8,
                generation: self.generations[index],
            });

            if expired {
                self.release(index);
            }
        }

        fired
    }

    fn release(&mut self, slot: usize) {
        self.slots[slot] = None;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
    }
}

/// Cancellation side of a timer queue, as seen by view teardown
pub trait TimerControl {
    /// Stop a timer. Returns `false` if it had already expired or been
    /// cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

impl TimerControl for TimerQueue {
    fn cancel(&mut self, id: TimerId) -> bool {
        TimerQueue::cancel(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerQueue::new();
        let id = timers.create(2000, Repeat::Times(1)).unwrap();

        assert!(timers.advance(1999).is_empty());
        assert_eq!(timers.advance(1).as_slice(), &[id]);
        assert!(!timers.is_active(id));
        assert!(timers.advance(5000).is_empty());
    }

    #[test]
    fn test_periodic_keeps_phase() {
        let mut timers = TimerQueue::new();
        let id = timers.create(1000, Repeat::Forever).unwrap();

        // 1300 ms elapsed: fires, next deadline 700 ms away
        assert_eq!(timers.advance(1300).len(), 1);
        assert!(timers.advance(699).is_empty());
        assert_eq!(timers.advance(1).as_slice(), &[id]);
        assert!(timers.is_active(id));
    }

    #[test]
    fn test_repeat_count_exhausts() {
        let mut timers = TimerQueue::new();
        let id = timers.create(10, Repeat::Times(3)).unwrap();
        let mut fires = 0;
        for _ in 0..10 {
            fires += timers.advance(10).len();
        }
        assert_eq!(fires, 3);
        assert!(!timers.is_active(id));
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.create(5, Repeat::Forever).unwrap();
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(100).is_empty());
    }

    #[test]
    fn test_stale_id_after_slot_reuse() {
        let mut timers = TimerQueue::new();
        let old = timers.create(5, Repeat::Forever).unwrap();
        timers.cancel(old);
        let new = timers.create(5, Repeat::Forever).unwrap();

        assert!(!timers.is_active(old));
        assert!(!timers.cancel(old));
        assert_eq!(timers.advance(5).as_slice(), &[new]);
    }

    #[test]
    fn test_full_queue() {
        let mut timers = TimerQueue::new();
        for _ in 0..MAX_TIMERS {
            timers.create(1, Repeat::Forever).unwrap();
        }
        assert_eq!(timers.create(1, Repeat::Forever), Err(TimerError::Full));
    }
}
