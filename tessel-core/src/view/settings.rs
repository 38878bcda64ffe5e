//! Settings menu

use alloc::rc::Rc;

use tessel_display::{DisplayError, LabelStyle, SurfaceDriver};
use tessel_hal::Button;

use super::{BuildContext, ClockView, SystemInfoView, ViewResources};
use crate::input::{InputBinder, Navigator};

#[derive(Debug)]
pub struct SettingsView {
    pub(super) resources: ViewResources,
}

impl SettingsView {
    pub const NAME: &'static str = "Settings";

    pub fn build<S: SurfaceDriver>(ctx: &mut BuildContext<'_, S>) -> Result<Self, DisplayError> {
        let (resources, _) = ViewResources::assemble(ctx, Self::NAME, |ctx, res| {
            ctx.surfaces
                .add_label(res.surface(), "Settings", LabelStyle::title(20))
                .map(|_| ())
        })?;
        Ok(Self { resources })
    }

    /// Button 1 returns to the clock, button 2 opens system info
    pub(super) fn register_inputs(&self, binder: &mut dyn InputBinder) {
        binder.register_view_handler(
            Button::One,
            Rc::new(|nav: &mut Navigator| nav.switch_to(ClockView::NAME)),
        );
        binder.register_view_handler(
            Button::Two,
            Rc::new(|nav: &mut Navigator| nav.switch_to(SystemInfoView::NAME)),
        );
    }
}
