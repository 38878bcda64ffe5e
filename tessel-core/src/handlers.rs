//! Handler arbitration table
//!
//! Each button has a default handler (installed once at startup) and an
//! optional view handler (claimed by the active view). The table decides
//! which of the two is bound to the click device:
//!
//! - a view handler always takes precedence while present
//! - clearing view handlers is the only path that rebinds defaults
//! - at most one callback is ever bound to a button
//!
//! Device failures are logged and never change the table. The table keeps
//! the intended binding, and every later transition resynchronizes all
//! buttons against it.

use alloc::rc::Rc;
use tessel_hal::{BindError, ClickDevice, BUTTON_COUNT};

use crate::input::Handler;

/// Default and view handler recorded for one button
#[derive(Clone, Default)]
pub struct HandlerBinding {
    default: Option<Handler>,
    view: Option<Handler>,
}

impl HandlerBinding {
    /// Process-wide fallback handler
    pub fn default_handler(&self) -> Option<&Handler> {
        self.default.as_ref()
    }

    /// Handler claimed by the active view
    pub fn view_handler(&self) -> Option<&Handler> {
        self.view.as_ref()
    }

    /// Handler that should be bound to the device
    pub fn intended(&self) -> Option<&Handler> {
        self.view.as_ref().or(self.default.as_ref())
    }
}

/// Arbitration table owning the click device
pub struct HandlerTable<B> {
    device: B,
    bindings: [HandlerBinding; BUTTON_COUNT],
}

impl<B: ClickDevice<Handler>> HandlerTable<B> {
    /// Create a table with no handlers recorded
    pub fn new(device: B) -> Self {
        Self {
            device,
            bindings: core::array::from_fn(|_| HandlerBinding::default()),
        }
    }

    /// Record the default handler for a button
    ///
    /// The default is bound immediately unless a view handler owns the
    /// button. Out-of-range buttons are logged and ignored.
    pub fn register_default(&mut self, index: usize, handler: Handler) {
        let Some(binding) = self.bindings.get_mut(index) else {
            warn!("register_default: button index {} out of range", index);
            return;
        };

        binding.default = Some(handler);
        if binding.view.is_none() {
            info!("button {}: default handler recorded", index + 1);
        } else {
            info!("button {}: default recorded, view handler active", index + 1);
        }
        self.reconcile();
    }

    /// Claim a button for the active view
    ///
    /// Unbinds the default if it is the bound callback, then binds
    /// `handler`. A view handler that is already present is overwritten.
    pub fn register_view(&mut self, index: usize, handler: Handler) {
        let Some(binding) = self.bindings.get_mut(index) else {
            warn!("register_view: button index {} out of range", index);
            return;
        };

        if binding.view.is_some() {
            warn!("button {}: replacing existing view handler", index + 1);
        }
        binding.view = Some(handler);
        if self.sync(index) {
            info!("button {}: view handler bound", index + 1);
        }
    }

    /// Release every view handler and rebind defaults
    ///
    /// Every button is resynchronized, so a binding left stale by an
    /// earlier device failure is repaired here as well.
    pub fn unregister_all_view_handlers(&mut self) {
        for (index, binding) in self.bindings.iter_mut().enumerate() {
            if binding.view.take().is_some() {
                debug!("button {}: view handler released", index + 1);
            }
        }
        self.reconcile();
    }

    /// Bring the device in line with the intended binding of every button
    pub fn reconcile(&mut self) {
        for index in 0..BUTTON_COUNT {
            self.sync(index);
        }
    }

    /// Callback to run for a click on a button
    ///
    /// Resynchronizes the button first. A bound callback that still differs
    /// from the intended one is never returned.
    pub fn dispatch_target(&mut self, index: usize) -> Option<Handler> {
        self.sync(index);
        let bound = self.device.bound(index)?;
        let intended = self.intended(index)?;
        if Rc::ptr_eq(bound, intended) {
            Some(bound.clone())
        } else {
            warn!("button {}: stale callback bound, click dropped", index + 1);
            None
        }
    }

    /// Recorded handlers for a button
    pub fn binding(&self, index: usize) -> Option<&HandlerBinding> {
        self.bindings.get(index)
    }

    /// Handler the table intends to be bound to a button
    pub fn intended(&self, index: usize) -> Option<&Handler> {
        self.bindings.get(index).and_then(HandlerBinding::intended)
    }

    /// Whether any button is claimed by a view
    pub fn has_view_handlers(&self) -> bool {
        self.bindings.iter().any(|b| b.view.is_some())
    }

    /// The underlying click device
    pub fn device(&self) -> &B {
        &self.device
    }

    /// Mutable access to the underlying click device
    pub fn device_mut(&mut self) -> &mut B {
        &mut self.device
    }
}

impl<B: ClickDevice<Handler>> HandlerTable<B> {
    /// Rebind or unbind one button so the device holds its intended
    /// callback. Returns whether the two now agree.
    fn sync(&mut self, index: usize) -> bool {
        let Some(binding) = self.bindings.get(index) else {
            return false;
        };
        let intended = binding.intended().cloned();

        let (in_sync, occupied) = match (&intended, self.device.bound(index)) {
            (Some(want), Some(have)) => (Rc::ptr_eq(want, have), true),
            (None, None) => (true, false),
            (_, bound) => (false, bound.is_some()),
        };
        if in_sync {
            return true;
        }

        if occupied {
            unbind(&mut self.device, index);
        }
        match intended {
            Some(handler) => {
                if bind(&mut self.device, index, handler) {
                    debug!("button {}: bound", index + 1);
                }
            }
            None => debug!("button {}: unbound", index + 1),
        }

        match (self.bindings[index].intended(), self.device.bound(index)) {
            (Some(want), Some(have)) => Rc::ptr_eq(want, have),
            (None, None) => true,
            _ => false,
        }
    }
}

fn bind<B: ClickDevice<Handler>>(device: &mut B, index: usize, handler: Handler) -> bool {
    match device.register_callback(index, handler) {
        Ok(()) => true,
        Err(e) => {
            report(index, "bind", e);
            false
        }
    }
}

fn unbind<B: ClickDevice<Handler>>(device: &mut B, index: usize) {
    match device.unregister_callback(index) {
        // Nothing bound is already the desired state
        Ok(()) | Err(BindError::NotRegistered) => {}
        Err(e) => report(index, "unbind", e),
    }
}

fn report(index: usize, op: &'static str, err: BindError) {
    error!("button {}: {} failed: {:?}", index + 1, op, err);
}
