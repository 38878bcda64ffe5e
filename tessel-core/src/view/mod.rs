//! Views
//!
//! A view is one full-screen unit of UI. Every variant owns a root surface
//! and possibly some timers, claims buttons while it is active, and is
//! destroyed before the next view is built.
//!
//! # Lifecycle
//!
//! ```text
//! build ──► register_inputs ──► (clicks, timers) ──► unregister_inputs ──► destroy
//! ```
//!
//! `destroy` cancels the view's timers before it releases the surface.

pub mod boot;
pub mod clock;
pub mod settings;
pub mod system_info;

use heapless::Vec;
use tessel_display::{DisplayError, SurfaceDriver, SurfaceHandle};

use crate::config::UiConfig;
use crate::input::{InputBinder, Navigator};
use crate::timer::{Repeat, TimerControl, TimerId, TimerQueue};

pub use boot::BootView;
pub use clock::{ClockState, ClockView};
pub use settings::SettingsView;
pub use system_info::SystemInfoView;

/// Maximum timers a single view may own
pub const MAX_VIEW_TIMERS: usize = 2;

/// Everything a view constructor may allocate from
pub struct BuildContext<'a, S> {
    pub surfaces: &'a mut S,
    pub timers: &'a mut TimerQueue,
    pub config: &'a UiConfig,
}

/// Surface and timers owned by a view
#[derive(Debug)]
pub struct ViewResources {
    surface: SurfaceHandle,
    timers: Vec<TimerId, MAX_VIEW_TIMERS>,
}

impl ViewResources {
    /// Allocate a root surface, run `populate`, and release everything
    /// allocated so far if it fails
    pub(crate) fn assemble<'a, S, T, F>(
        ctx: &mut BuildContext<'a, S>,
        name: &str,
        populate: F,
    ) -> Result<(Self, T), DisplayError>
    where
        S: SurfaceDriver,
        F: FnOnce(&mut BuildContext<'a, S>, &mut ViewResources) -> Result<T, DisplayError>,
    {
        let surface = ctx.surfaces.create_root_surface(name)?;
        let mut resources = Self {
            surface,
            timers: Vec::new(),
        };

        match populate(ctx, &mut resources) {
            Ok(parts) => Ok((resources, parts)),
            Err(e) => {
                warn!("{}: construction failed, releasing partial view", name);
                resources.release(ctx.surfaces, ctx.timers);
                Err(e)
            }
        }
    }

    /// Root surface
    pub fn surface(&self) -> SurfaceHandle {
        self.surface
    }

    /// Start a timer owned by this view
    pub(crate) fn start_timer(
        &mut self,
        timers: &mut TimerQueue,
        period_ms: u32,
        repeat: Repeat,
    ) -> Result<TimerId, DisplayError> {
        if self.timers.is_full() {
            return Err(DisplayError::CapacityExceeded);
        }
        let id = timers
            .create(period_ms, repeat)
            .map_err(|_| DisplayError::OutOfMemory)?;
        let _ = self.timers.push(id);
        Ok(id)
    }

    /// Check if a timer belongs to this view
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timers.contains(&id)
    }

    /// Cancel timers, then release the surface
    ///
    /// Timers that already expired are skipped.
    pub(crate) fn release<S, T>(self, surfaces: &mut S, timers: &mut T)
    where
        S: SurfaceDriver,
        T: TimerControl,
    {
        for id in self.timers {
            timers.cancel(id);
        }
        surfaces.destroy_surface(self.surface);
    }
}

/// The active view
#[derive(Debug)]
pub enum View {
    Boot(BootView),
    Clock(ClockView),
    Settings(SettingsView),
    SystemInfo(SystemInfoView),
}

impl View {
    /// Build the boot splash
    pub fn boot<S: SurfaceDriver>(ctx: &mut BuildContext<'_, S>) -> Result<View, DisplayError> {
        BootView::build(ctx).map(View::Boot)
    }

    /// Build the clock
    pub fn clock<S: SurfaceDriver>(ctx: &mut BuildContext<'_, S>) -> Result<View, DisplayError> {
        ClockView::build(ctx).map(View::Clock)
    }

    /// Build the settings menu
    pub fn settings<S: SurfaceDriver>(
        ctx: &mut BuildContext<'_, S>,
    ) -> Result<View, DisplayError> {
        SettingsView::build(ctx).map(View::Settings)
    }

    /// Build the system information page
    pub fn system_info<S: SurfaceDriver>(
        ctx: &mut BuildContext<'_, S>,
    ) -> Result<View, DisplayError> {
        SystemInfoView::build(ctx).map(View::SystemInfo)
    }

    /// View identifier
    pub fn name(&self) -> &'static str {
        match self {
            View::Boot(_) => BootView::NAME,
            View::Clock(_) => ClockView::NAME,
            View::Settings(_) => SettingsView::NAME,
            View::SystemInfo(_) => SystemInfoView::NAME,
        }
    }

    fn resources(&self) -> &ViewResources {
        match self {
            View::Boot(v) => &v.resources,
            View::Clock(v) => &v.resources,
            View::Settings(v) => &v.resources,
            View::SystemInfo(v) => &v.resources,
        }
    }

    /// Root surface
    pub fn surface(&self) -> SurfaceHandle {
        self.resources().surface()
    }

    /// Check if a timer belongs to this view
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.resources().owns_timer(id)
    }

    /// Claim the buttons this view handles
    pub fn register_inputs(&self, binder: &mut dyn InputBinder) {
        match self {
            View::Boot(_) => {}
            View::Clock(v) => v.register_inputs(binder),
            View::Settings(v) => v.register_inputs(binder),
            View::SystemInfo(v) => v.register_inputs(binder),
        }
    }

    /// Give up every button claim
    pub fn unregister_inputs(&self, binder: &mut dyn InputBinder) {
        binder.unregister_all_view_handlers();
    }

    /// Deliver a fired timer
    pub fn on_timer<S: SurfaceDriver>(&mut self, id: TimerId, surfaces: &mut S, nav: &mut Navigator) {
        match self {
            View::Boot(v) => v.on_timer(id, nav),
            View::Clock(v) => v.on_timer(id, surfaces),
            View::Settings(_) | View::SystemInfo(_) => {}
        }
    }

    /// Cancel timers and release the surface
    pub fn destroy<S, T>(self, surfaces: &mut S, timers: &mut T)
    where
        S: SurfaceDriver,
        T: TimerControl,
    {
        let name = self.name();
        let resources = match self {
            View::Boot(v) => v.resources,
            View::Clock(v) => v.resources,
            View::Settings(v) => v.resources,
            View::SystemInfo(v) => v.resources,
        };
        resources.release(surfaces, timers);
        debug!("{}: destroyed", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use tessel_display::{GridLayout, LabelId, LabelStyle, Rgb, SurfaceStore};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Cancel(TimerId),
        Destroy(SurfaceHandle),
    }

    type Log = Rc<RefCell<alloc::vec::Vec<Event>>>;

    /// Surface store that records every destroy
    struct RecordingSurfaces {
        inner: SurfaceStore<2>,
        log: Log,
    }

    impl SurfaceDriver for RecordingSurfaces {
        fn create_root_surface(&mut self, name: &str) -> Result<SurfaceHandle, DisplayError> {
            self.inner.create_root_surface(name)
        }
        fn destroy_surface(&mut self, handle: SurfaceHandle) {
            self.log.borrow_mut().push(Event::Destroy(handle));
            self.inner.destroy_surface(handle)
        }
        fn load_surface(&mut self, handle: SurfaceHandle) -> Result<(), DisplayError> {
            self.inner.load_surface(handle)
        }
        fn is_live(&self, handle: SurfaceHandle) -> bool {
            self.inner.is_live(handle)
        }
        fn add_label(
            &mut self,
            surface: SurfaceHandle,
            text: &str,
            style: LabelStyle,
        ) -> Result<LabelId, DisplayError> {
            self.inner.add_label(surface, text, style)
        }
        fn set_label_text(
            &mut self,
            surface: SurfaceHandle,
            label: LabelId,
            text: &str,
        ) -> Result<(), DisplayError> {
            self.inner.set_label_text(surface, label, text)
        }
        fn add_grid(&mut self, surface: SurfaceHandle, layout: GridLayout) -> Result<(), DisplayError> {
            self.inner.add_grid(surface, layout)
        }
        fn set_cell_color(
            &mut self,
            surface: SurfaceHandle,
            cell: usize,
            color: Rgb,
        ) -> Result<(), DisplayError> {
            self.inner.set_cell_color(surface, cell, color)
        }
        fn fill_cells(&mut self, surface: SurfaceHandle, color: Rgb) -> Result<(), DisplayError> {
            self.inner.fill_cells(surface, color)
        }
    }

    /// Timer queue that records every cancel
    struct RecordingTimers {
        inner: TimerQueue,
        log: Log,
    }

    impl TimerControl for RecordingTimers {
        fn cancel(&mut self, id: TimerId) -> bool {
            self.log.borrow_mut().push(Event::Cancel(id));
            self.inner.cancel(id)
        }
    }

    fn build(
        constructor: fn(&mut BuildContext<'_, RecordingSurfaces>) -> Result<View, DisplayError>,
        log: &Log,
    ) -> (View, RecordingSurfaces, RecordingTimers) {
        let mut surfaces = RecordingSurfaces {
            inner: SurfaceStore::new(),
            log: log.clone(),
        };
        let mut queue = TimerQueue::new();
        let config = UiConfig::default();
        let view = constructor(&mut BuildContext {
            surfaces: &mut surfaces,
            timers: &mut queue,
            config: &config,
        })
        .unwrap();
        let timers = RecordingTimers {
            inner: queue,
            log: log.clone(),
        };
        (view, surfaces, timers)
    }

    #[test]
    fn test_clock_timer_cancelled_before_surface_released() {
        let log = Log::default();
        let (view, mut surfaces, mut timers) = build(View::clock, &log);
        let surface = view.surface();
        assert_eq!(timers.inner.active_count(), 1);

        view.destroy(&mut surfaces, &mut timers);

        let events = log.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::Cancel(_)));
        assert_eq!(events[1], Event::Destroy(surface));
        assert_eq!(timers.inner.active_count(), 0);
        assert_eq!(surfaces.inner.live_count(), 0);
    }

    #[test]
    fn test_view_without_timers_only_releases_surface() {
        let log = Log::default();
        let (view, mut surfaces, mut timers) = build(View::settings, &log);
        let surface = view.surface();

        view.destroy(&mut surfaces, &mut timers);

        assert_eq!(*log.borrow(), [Event::Destroy(surface)]);
    }
}
