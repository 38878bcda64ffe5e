//! Boot splash
//!
//! Shows a single label, claims no buttons and switches to the clock once
//! the boot delay has elapsed.

use tessel_display::{DisplayError, LabelStyle, SurfaceDriver};

use super::{BuildContext, ViewResources};
use crate::input::Navigator;
use crate::timer::{Repeat, TimerId};
use crate::view::ClockView;

#[derive(Debug)]
pub struct BootView {
    pub(super) resources: ViewResources,
    delay_timer: TimerId,
}

impl BootView {
    pub const NAME: &'static str = "Boot";

    pub fn build<S: SurfaceDriver>(ctx: &mut BuildContext<'_, S>) -> Result<Self, DisplayError> {
        let (resources, delay_timer) = ViewResources::assemble(ctx, Self::NAME, |ctx, res| {
            ctx.surfaces
                .add_label(res.surface(), "Booting...", LabelStyle::title(20))?;
            res.start_timer(ctx.timers, ctx.config.boot_delay_ms, Repeat::Times(1))
        })?;

        info!("boot: switching to clock in {} ms", ctx.config.boot_delay_ms);
        Ok(Self {
            resources,
            delay_timer,
        })
    }

    pub(super) fn on_timer(&mut self, id: TimerId, nav: &mut Navigator) {
        if id == self.delay_timer {
            nav.switch_to(ClockView::NAME);
        }
    }
}
