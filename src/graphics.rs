//! Driver for embedded-graphics.
//!
//! Unlike a framebuffer target, every call goes straight to the panel.

use core::convert::TryFrom;
use core::ops::Range;

use embedded_graphics::{
    pixelcolor::{IntoStorage, Rgb565},
    prelude::*,
    primitives::Rectangle,
};

use crate::{DisplayInterface, DisplaySize, ILI9341};

impl<DI: DisplayInterface, S: DisplaySize> ILI9341<DI, S> {
    /// Part of `area` on the panel, as (x, y, w, h). `None` when nothing is visible.
    fn clip(&self, area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.is_zero_sized() {
            return None;
        }
        let Range { start: x, .. } = drawable_area.columns();
        let Range { start: y, .. } = drawable_area.rows();
        Some((
            u16::try_from(x).ok()?,
            u16::try_from(y).ok()?,
            u16::try_from(drawable_area.size.width).ok()?,
            u16::try_from(drawable_area.size.height).ok()?,
        ))
    }
}

impl<DI: DisplayInterface, S: DisplaySize> OriginDimensions for ILI9341<DI, S> {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl<DI: DisplayInterface, S: DisplaySize> DrawTarget for ILI9341<DI, S> {
    type Color = Rgb565;
    type Error = DI::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels.into_iter() {
            self.draw_pixel(point.x, point.y, color.into_storage())?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let (x, y, w, h) = match self.clip(area) {
            Some(window) => window,
            None => return Ok(()),
        };
        let drawable_area = Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(w as u32, h as u32),
        );

        self.set_address_window(x, y, w, h)?;
        self.interface.send_pixels(
            area.points()
                .zip(colors)
                .filter(|(pos, _color)| drawable_area.contains(*pos))
                .map(|(_, color)| color.into_storage()),
        )?;
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        match self.clip(area) {
            Some((x, y, w, h)) => self.fill_rectangle(x, y, w, h, color.into_storage()),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into_storage())
    }
}
