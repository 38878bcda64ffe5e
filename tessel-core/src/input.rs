//! Handler type and the surface views use to claim buttons
//!
//! Handlers never see the display session. Instead they receive a
//! [`Navigator`] and may request a view switch through it; the session
//! applies the request once the handler has returned.

use alloc::rc::Rc;

use tessel_hal::{Button, ClickDevice};

use crate::handlers::HandlerTable;

/// Click callback bound to a button
///
/// Captured state belongs to the view that created the handler and is
/// released when the arbitration table drops its last reference.
pub type Handler = Rc<dyn Fn(&mut Navigator)>;

/// Collects a view switch request from a handler or timer hook
#[derive(Debug, Default)]
pub struct Navigator {
    pending: Option<&'static str>,
}

impl Navigator {
    /// Create a navigator with no pending request
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Request a switch to the named view
    ///
    /// If called more than once, the last request wins.
    pub fn switch_to(&mut self, view: &'static str) {
        if let Some(previous) = self.pending.replace(view) {
            debug!("switch to {} replaces request for {}", view, previous);
        }
    }

    /// Pending request, if any
    pub fn pending(&self) -> Option<&'static str> {
        self.pending
    }

    /// Take the pending request
    pub fn take(&mut self) -> Option<&'static str> {
        self.pending.take()
    }
}

/// Operations a view may perform on the arbitration table
pub trait InputBinder {
    /// Claim a button for the active view
    fn register_view_handler(&mut self, button: Button, handler: Handler);

    /// Drop every view claim and restore defaults
    fn unregister_all_view_handlers(&mut self);
}

impl<B: ClickDevice<Handler>> InputBinder for HandlerTable<B> {
    fn register_view_handler(&mut self, button: Button, handler: Handler) {
        self.register_view(button.index(), handler);
    }

    fn unregister_all_view_handlers(&mut self) {
        HandlerTable::unregister_all_view_handlers(self);
    }
}

/// Give every button a default handler that only logs the click
pub fn install_default_handlers<B: ClickDevice<Handler>>(table: &mut HandlerTable<B>) {
    for button in Button::ALL {
        let number = button.number();
        table.register_default(
            button.index(),
            Rc::new(move |_: &mut Navigator| {
                info!("button {} (default)", number);
            }),
        );
    }
}
