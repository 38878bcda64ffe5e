//! Display session
//!
//! Owns the single active view together with everything it depends on:
//! the surface driver, the arbitration table, the timer queue and the view
//! registry. [`DisplaySession::switch_to`] is the only operation that
//! changes what is on screen.
//!
//! # Switch sequence
//!
//! ```text
//! lookup ──► unregister handlers ──► destroy old ──► build new ──► register handlers ──► load
//!  │                                                  │
//!  └─ unknown: nothing changes                        └─ build or load failure: session stays Empty
//! ```
//!
//! Handlers and timer hooks request switches through a [`Navigator`]; the
//! session applies the request after the callback has returned, so a switch
//! never runs while a handler of the outgoing view is executing.

use core::mem;

use tessel_display::SurfaceDriver;
use tessel_hal::ClickDevice;

use crate::config::UiConfig;
use crate::error::SwitchError;
use crate::handlers::HandlerTable;
use crate::input::{Handler, Navigator};
use crate::registry::ViewRegistry;
use crate::timer::TimerQueue;
use crate::view::{BuildContext, View};

/// Session state
#[derive(Debug, Default)]
pub enum SessionState {
    /// No view is loaded
    #[default]
    Empty,
    /// Exactly one view is loaded and visible
    Active(View),
}

/// Display session
pub struct DisplaySession<S, B> {
    surfaces: S,
    handlers: HandlerTable<B>,
    timers: TimerQueue,
    registry: ViewRegistry<S>,
    config: UiConfig,
    state: SessionState,
}

impl<S, B> DisplaySession<S, B>
where
    S: SurfaceDriver,
    B: ClickDevice<Handler>,
{
    /// Create an empty session
    ///
    /// # Arguments
    /// * `surfaces` - Surface driver the views build into
    /// * `device` - Click device the arbitration table binds to
    /// * `registry` - Views that can be switched to
    /// * `config` - Timing passed to view constructors
    pub fn new(surfaces: S, device: B, registry: ViewRegistry<S>, config: UiConfig) -> Self {
        Self {
            surfaces,
            handlers: HandlerTable::new(device),
            timers: TimerQueue::new(),
            registry,
            config,
            state: SessionState::Empty,
        }
    }

    /// Replace the active view with a fresh instance of `name`
    ///
    /// An unknown name leaves the current view and its bindings untouched.
    /// If the new view cannot be built or loaded the session is left
    /// `Empty`.
    pub fn switch_to(&mut self, name: &str) -> Result<(), SwitchError> {
        if !self.registry.contains(name) {
            warn!("switch_to: unknown view {}", name);
            return Err(SwitchError::ViewNotFound);
        }

        info!("switch_to: {}", name);
        self.teardown();

        let mut ctx = BuildContext {
            surfaces: &mut self.surfaces,
            timers: &mut self.timers,
            config: &self.config,
        };
        let view = match self.registry.create(name, &mut ctx) {
            Ok(view) => view,
            Err(e) => {
                error!("switch_to: building {} failed: {:?}", name, e);
                return Err(e);
            }
        };

        let surface = view.surface();
        self.state = SessionState::Active(view);
        if let SessionState::Active(view) = &self.state {
            view.register_inputs(&mut self.handlers);
        }

        if let Err(e) = self.surfaces.load_surface(surface) {
            error!("switch_to: loading {} failed: {:?}", name, e);
            self.teardown();
            return Err(SwitchError::Load(e));
        }

        info!("switch_to: {} active", name);
        Ok(())
    }

    /// Run the callback bound to a clicked button
    ///
    /// Clicks on unbound buttons are ignored, and so are clicks on a button
    /// whose bound callback could not be brought in line with the table. A
    /// switch requested by the callback is applied before this returns.
    pub fn handle_click(&mut self, index: usize) -> Result<(), SwitchError> {
        let Some(handler) = self.handlers.dispatch_target(index) else {
            trace!("button {}: no handler, click ignored", index + 1);
            return Ok(());
        };

        let mut nav = Navigator::new();
        handler(&mut nav);
        self.apply(nav)
    }

    /// Advance view timers by `elapsed_ms` and deliver the ones that fired
    ///
    /// If a timer hook requests a switch, the switch is applied and the
    /// remaining fired timers are dropped.
    pub fn run_timers(&mut self, elapsed_ms: u32) -> Result<(), SwitchError> {
        let fired = self.timers.advance(elapsed_ms);

        for id in fired {
            let SessionState::Active(view) = &mut self.state else {
                break;
            };
            if !view.owns_timer(id) {
                continue;
            }

            let mut nav = Navigator::new();
            view.on_timer(id, &mut self.surfaces, &mut nav);
            if nav.pending().is_some() {
                return self.apply(nav);
            }
        }

        Ok(())
    }

    /// Tear down the active view, leaving the session `Empty`
    pub fn shutdown(&mut self) {
        if self.is_active() {
            info!("shutdown: releasing {}", self.current_view_name().unwrap_or(""));
        }
        self.teardown();
    }

    /// Name of the active view
    pub fn current_view_name(&self) -> Option<&'static str> {
        match &self.state {
            SessionState::Active(view) => Some(view.name()),
            SessionState::Empty => None,
        }
    }

    /// Whether a view is loaded
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Arbitration table
    pub fn handlers(&self) -> &HandlerTable<B> {
        &self.handlers
    }

    /// Mutable arbitration table, for installing defaults
    pub fn handlers_mut(&mut self) -> &mut HandlerTable<B> {
        &mut self.handlers
    }

    /// Surface driver
    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    /// Mutable surface driver, for the renderer
    pub fn surfaces_mut(&mut self) -> &mut S {
        &mut self.surfaces
    }

    /// Timer queue
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// UI configuration
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    fn apply(&mut self, mut nav: Navigator) -> Result<(), SwitchError> {
        match nav.take() {
            Some(target) => self.switch_to(target),
            None => Ok(()),
        }
    }

    /// Unregister handlers, then destroy the active view
    fn teardown(&mut self) {
        if let SessionState::Active(view) = mem::take(&mut self.state) {
            view.unregister_inputs(&mut self.handlers);
            view.destroy(&mut self.surfaces, &mut self.timers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::install_default_handlers;
    use alloc::rc::Rc;
    use tessel_display::{
        DisplayError, GridLayout, LabelId, LabelStyle, Rgb, SurfaceHandle, SurfaceStore,
    };
    use tessel_hal::{CallbackSlots, BUTTON_COUNT};

    type Slots = CallbackSlots<Handler, BUTTON_COUNT>;

    fn session() -> DisplaySession<SurfaceStore<4>, Slots> {
        let mut session = DisplaySession::new(
            SurfaceStore::new(),
            CallbackSlots::new(),
            ViewRegistry::with_builtin(),
            UiConfig::default(),
        );
        install_default_handlers(session.handlers_mut());
        session
    }

    /// Store whose `load_surface` always fails
    struct NoLoad(SurfaceStore<4>);

    impl SurfaceDriver for NoLoad {
        fn create_root_surface(&mut self, name: &str) -> Result<SurfaceHandle, DisplayError> {
            self.0.create_root_surface(name)
        }
        fn destroy_surface(&mut self, handle: SurfaceHandle) {
            self.0.destroy_surface(handle)
        }
        fn load_surface(&mut self, _: SurfaceHandle) -> Result<(), DisplayError> {
            Err(DisplayError::Communication)
        }
        fn is_live(&self, handle: SurfaceHandle) -> bool {
            self.0.is_live(handle)
        }
        fn add_label(
            &mut self,
            surface: SurfaceHandle,
            text: &str,
            style: LabelStyle,
        ) -> Result<LabelId, DisplayError> {
            self.0.add_label(surface, text, style)
        }
        fn set_label_text(
            &mut self,
            surface: SurfaceHandle,
            label: LabelId,
            text: &str,
        ) -> Result<(), DisplayError> {
            self.0.set_label_text(surface, label, text)
        }
        fn add_grid(&mut self, surface: SurfaceHandle, layout: GridLayout) -> Result<(), DisplayError> {
            self.0.add_grid(surface, layout)
        }
        fn set_cell_color(
            &mut self,
            surface: SurfaceHandle,
            cell: usize,
            color: Rgb,
        ) -> Result<(), DisplayError> {
            self.0.set_cell_color(surface, cell, color)
        }
        fn fill_cells(&mut self, surface: SurfaceHandle, color: Rgb) -> Result<(), DisplayError> {
            self.0.fill_cells(surface, color)
        }
    }

    #[test]
    fn test_starts_empty() {
        let session = session();
        assert!(!session.is_active());
        assert_eq!(session.current_view_name(), None);
        assert_eq!(session.handlers().device().bound_count(), BUTTON_COUNT);
    }

    #[test]
    fn test_click_on_unbound_button_is_ignored() {
        let mut session = DisplaySession::new(
            SurfaceStore::<4>::new(),
            Slots::new(),
            ViewRegistry::with_builtin(),
            UiConfig::default(),
        );
        assert_eq!(session.handle_click(0), Ok(()));
        assert_eq!(session.handle_click(BUTTON_COUNT + 1), Ok(()));
    }

    #[test]
    fn test_default_click_does_not_switch() {
        let mut session = session();
        session.switch_to("Boot").unwrap();
        assert_eq!(session.handle_click(1), Ok(()));
        assert_eq!(session.current_view_name(), Some("Boot"));
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut session = session();
        session.switch_to("Clock").unwrap();
        session.shutdown();

        assert!(!session.is_active());
        assert_eq!(session.surfaces().live_count(), 0);
        assert_eq!(session.timers().active_count(), 0);
        assert!(!session.handlers().has_view_handlers());
        // Shutting down an empty session is a no-op
        session.shutdown();
    }

    #[test]
    fn test_load_failure_leaves_empty() {
        let mut session = DisplaySession::new(
            NoLoad(SurfaceStore::new()),
            Slots::new(),
            ViewRegistry::with_builtin(),
            UiConfig::default(),
        );
        assert_eq!(
            session.switch_to("Settings"),
            Err(SwitchError::Load(DisplayError::Communication))
        );
        assert!(!session.is_active());
        assert!(!session.handlers().has_view_handlers());
        assert_eq!(session.handlers().device().bound_count(), 0);
        assert_eq!(session.surfaces().0.live_count(), 0);
    }

    #[test]
    fn test_stale_binding_repaired_before_click() {
        let mut session = session();
        session.switch_to("Clock").unwrap();

        // Simulate a device that kept Clock's button 4 callback after a
        // failed teardown: the table already intends the default again
        let stale = session.handlers().device().bound(3).cloned().unwrap();
        session.switch_to("System Info").unwrap();
        session.handlers_mut().device_mut().register_callback(3, stale).unwrap();

        session.handle_click(3).unwrap();
        assert_eq!(session.current_view_name(), Some("System Info"));
        let binding = session.handlers().binding(3).unwrap();
        assert!(Rc::ptr_eq(
            session.handlers().device().bound(3).unwrap(),
            binding.default_handler().unwrap()
        ));
    }

    #[test]
    fn test_construction_failure_leaves_empty() {
        // Room for exactly one surface: the second view cannot be built
        // while the first is still alive, but teardown frees the slot.
        let mut session = DisplaySession::new(
            SurfaceStore::<1>::new(),
            Slots::new(),
            ViewRegistry::with_builtin(),
            UiConfig::default(),
        );
        session.switch_to("Settings").unwrap();
        session.switch_to("System Info").unwrap();
        assert_eq!(session.surfaces().live_count(), 1);

        fn broken(_: &mut BuildContext<'_, SurfaceStore<1>>) -> Result<View, DisplayError> {
            Err(DisplayError::OutOfMemory)
        }
        let mut registry: ViewRegistry<SurfaceStore<1>> = ViewRegistry::with_builtin();
        registry.register("Broken", broken).unwrap();
        let mut session = DisplaySession::new(
            SurfaceStore::<1>::new(),
            Slots::new(),
            registry,
            UiConfig::default(),
        );
        session.switch_to("Settings").unwrap();
        assert_eq!(
            session.switch_to("Broken"),
            Err(SwitchError::Construction(DisplayError::OutOfMemory))
        );
        assert!(!session.is_active());
        assert_eq!(session.surfaces().live_count(), 0);
        assert!(!session.handlers().has_view_handlers());
    }
}
