//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use tessel_hal::Button;

/// Channel capacity for click events
const CLICK_CHANNEL_SIZE: usize = 8;

/// Debounced clicks from the button task, consumed by the UI task
///
/// All handler dispatch and view switching happens on the UI task; the
/// button task only produces events.
pub static CLICK_CHANNEL: Channel<CriticalSectionRawMutex, Button, CLICK_CHANNEL_SIZE> =
    Channel::new();
