//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod buttons;
pub mod tick;
pub mod ui;

pub use buttons::button_task;
pub use tick::tick_task;
pub use ui::ui_task;
