//! Surface rendering
//!
//! Draws the loaded surface onto any RGB565 draw target. Every render is a
//! full redraw: background, grid container, cells, then labels on top.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use tessel_display::{Anchor, CellGrid, FontSize, Label, Rgb, Surface};

/// Renderer for a fixed-size panel
pub struct Renderer {
    size: Size,
}

impl Renderer {
    /// Create a renderer for a `width` x `height` panel
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width as u32, height as u32),
        }
    }

    /// Draw a surface, or blank the panel if nothing is loaded
    pub fn draw<D>(&self, target: &mut D, surface: Option<&Surface>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(surface) = surface else {
            return target.clear(Rgb565::BLACK);
        };

        target.clear(color(surface.background()))?;

        if let Some(grid) = surface.grid() {
            self.draw_grid(target, grid)?;
        }

        for label in surface.labels() {
            self.draw_label(target, label)?;
        }

        Ok(())
    }

    fn draw_grid<D>(&self, target: &mut D, grid: &CellGrid) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let layout = grid.layout();
        let container = Size::new(layout.width() as u32, layout.height() as u32);
        let origin = self.place(layout.anchor, layout.offset, container);

        let radius = Size::new_equal(layout.radius as u32);
        RoundedRectangle::with_equal_corners(Rectangle::new(origin, container), radius)
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .fill_color(color(layout.background))
                    .build(),
            )
            .draw(target)?;

        let cell_size = Size::new_equal(layout.cell_size as u32);
        for (index, cell) in grid.cells().iter().enumerate() {
            let Some((x, y)) = layout.cell_origin(index) else {
                continue;
            };
            let top_left = origin + Point::new(x as i32, y as i32);
            RoundedRectangle::with_equal_corners(Rectangle::new(top_left, cell_size), radius)
                .into_styled(
                    PrimitiveStyleBuilder::new()
                        .fill_color(color(*cell))
                        .stroke_color(color(layout.border))
                        .stroke_width(1)
                        .build(),
                )
                .draw(target)?;
        }

        Ok(())
    }

    fn draw_label<D>(&self, target: &mut D, label: &Label) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = label.style();
        let character_style = MonoTextStyle::new(font(style.font), color(style.color));

        let (alignment, baseline) = match style.anchor {
            Anchor::TopLeft => (Alignment::Left, Baseline::Top),
            Anchor::TopMid => (Alignment::Center, Baseline::Top),
            Anchor::Center => (Alignment::Center, Baseline::Middle),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        // Text is positioned by its alignment point, not its bounding box
        let anchor_point = self.place(style.anchor, style.offset, Size::zero());
        Text::with_text_style(label.text(), anchor_point, character_style, text_style)
            .draw(target)?;
        Ok(())
    }

    /// Top-left corner of a `size` box placed at `anchor` plus `offset`
    fn place(&self, anchor: Anchor, offset: (i16, i16), size: Size) -> Point {
        let screen_w = self.size.width as i32;
        let screen_h = self.size.height as i32;
        let w = size.width as i32;
        let h = size.height as i32;

        let base = match anchor {
            Anchor::TopLeft => Point::zero(),
            Anchor::TopMid => Point::new((screen_w - w) / 2, 0),
            Anchor::Center => Point::new((screen_w - w) / 2, (screen_h - h) / 2),
        };
        base + Point::new(offset.0 as i32, offset.1 as i32)
    }
}

fn font(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Medium => &FONT_9X15,
        FontSize::Large => &FONT_10X20,
    }
}

fn color(rgb: Rgb) -> Rgb565 {
    Rgb888::new(rgb.r, rgb.g, rgb.b).into()
}
