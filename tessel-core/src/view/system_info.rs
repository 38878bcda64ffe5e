//! System information page

use alloc::rc::Rc;

use tessel_display::{DisplayError, LabelStyle, SurfaceDriver};
use tessel_hal::Button;

use super::{BuildContext, SettingsView, ViewResources};
use crate::input::{InputBinder, Navigator};

#[derive(Debug)]
pub struct SystemInfoView {
    pub(super) resources: ViewResources,
}

impl SystemInfoView {
    pub const NAME: &'static str = "System Info";

    pub fn build<S: SurfaceDriver>(ctx: &mut BuildContext<'_, S>) -> Result<Self, DisplayError> {
        let (resources, _) = ViewResources::assemble(ctx, Self::NAME, |ctx, res| {
            let surface = res.surface();
            ctx.surfaces
                .add_label(surface, "System Info", LabelStyle::title(20))?;
            ctx.surfaces.add_label(
                surface,
                concat!("Tessel v", env!("CARGO_PKG_VERSION")),
                LabelStyle::title(60),
            )?;
            Ok(())
        })?;
        Ok(Self { resources })
    }

    /// Button 3 goes back to settings
    pub(super) fn register_inputs(&self, binder: &mut dyn InputBinder) {
        binder.register_view_handler(
            Button::Three,
            Rc::new(|nav: &mut Navigator| nav.switch_to(SettingsView::NAME)),
        );
    }
}
