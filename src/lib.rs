//! ILI9341 TFT LCD driver.
//!
//! The driver talks to the controller through a [`DisplayInterface`], usually an
//! [`SPIInterface`] built from an embedded-hal SPI bus and a D/C pin, with an
//! optional reset pin.
//!
//! ```ignore
//! let di = SPIInterface::new(spi, dc, rst);
//! let mut lcd = ILI9341::new(di);
//! lcd.begin(&mut delay)?;
//! lcd.set_rotation(1)?;
//! lcd.fill_rectangle(10, 20, 30, 40, color::RED)?;
//! ```
//!
//! Drawing outside the panel is only guarded for single pixels, everything else
//! expects coordinates inside the current width and height.
#![cfg_attr(not(test), no_std)]

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    };
}

pub mod color;
pub mod command;
pub mod display;
pub mod graphics;
pub mod init;
pub mod interface;

#[cfg(test)]
mod mock;

use core::marker::PhantomData;

use embedded_hal::blocking::delay::DelayUs;

use command::Command;
pub use display::{DisplayRotation, DisplaySize, DisplaySize240x320};
use init::{InitSequence, DELAY_US};
pub use interface::{DisplayError, DisplayInterface, NoResetPin, SPIInterface};

/// Native panel width, in portrait
pub const TFT_WIDTH: u16 = DisplaySize240x320::WIDTH;
/// Native panel height, in portrait
pub const TFT_HEIGHT: u16 = DisplaySize240x320::HEIGHT;

/// ILI9341 device handle.
///
/// Owns the interface. Call [`ILI9341::begin`] before drawing.
pub struct ILI9341<DI: DisplayInterface, S: DisplaySize = DisplaySize240x320> {
    pub interface: DI,
    width: u16,
    height: u16,
    rotation: DisplayRotation,
    _phantom: PhantomData<S>,
}

impl<DI: DisplayInterface, S: DisplaySize> ILI9341<DI, S> {
    pub fn new(interface: DI) -> Self {
        Self {
            interface,
            width: S::WIDTH,
            height: S::HEIGHT,
            rotation: DisplayRotation::Rotate0,
            _phantom: PhantomData,
        }
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.interface
    }

    /// Reset the controller and replay the power-up sequence.
    ///
    /// Without a reset line the controller gets a software reset. Leaves the panel
    /// in portrait, display on.
    pub fn begin<DELAY>(&mut self, delay: &mut DELAY) -> Result<(), DI::Error>
    where
        DELAY: DelayUs<u32>,
    {
        if self.interface.reset(delay, 5_000, 20_000) {
            debug!("hardware reset");
        } else {
            debug!("software reset");
            self.interface.send_command(Command::SoftwareReset as u8)?;
            delay.delay_us(DELAY_US);
        }

        for entry in InitSequence::default() {
            self.interface.send_command_data(entry.command, entry.args)?;
            if entry.delay {
                delay.delay_us(DELAY_US);
            }
        }
        debug!("init sequence sent");

        self.rotation = DisplayRotation::Rotate0;
        self.width = S::WIDTH;
        self.height = S::HEIGHT;

        Ok(())
    }

    /// Current logical width, depends on rotation.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Current logical height, depends on rotation.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Set rotation by index, wraps modulo 4.
    pub fn set_rotation(&mut self, rotation: u8) -> Result<(), DI::Error> {
        self.set_orientation(DisplayRotation::from(rotation))
    }

    pub fn set_orientation(&mut self, rotation: DisplayRotation) -> Result<(), DI::Error> {
        debug!("rotation {}", rotation);

        let (width, height) = rotation.dimensions(S::WIDTH, S::HEIGHT);
        self.rotation = rotation;
        self.width = width;
        self.height = height;

        self.interface
            .send_command_data(Command::MemoryAccessControl as u8, &[rotation.madctl()])
    }

    pub fn invert_display(&mut self, invert: bool) -> Result<(), DI::Error> {
        let command = if invert {
            Command::InversionOn
        } else {
            Command::InversionOff
        };
        self.interface.send_command(command as u8)
    }

    pub fn set_display_on(&mut self, on: bool) -> Result<(), DI::Error> {
        let command = if on {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        };
        self.interface.send_command(command as u8)
    }

    /// Enter sleep mode.
    pub fn sleep<DELAY>(&mut self, delay: &mut DELAY) -> Result<(), DI::Error>
    where
        DELAY: DelayUs<u32>,
    {
        self.interface.send_command(Command::SleepIn as u8)?;
        delay.delay_us(5_000);
        Ok(())
    }

    /// Leave sleep mode, memory content is kept.
    pub fn wake_up<DELAY>(&mut self, delay: &mut DELAY) -> Result<(), DI::Error>
    where
        DELAY: DelayUs<u32>,
    {
        self.interface.send_command(Command::SleepOut as u8)?;
        delay.delay_us(DELAY_US);
        Ok(())
    }

    /// Vertical scroll start line.
    pub fn scroll_to(&mut self, offset: u16) -> Result<(), DI::Error> {
        self.interface
            .send_command_data(Command::VerticalScrollAddr as u8, &offset.to_be_bytes())
    }

    /// Define fixed top and bottom areas, the lines in between scroll.
    ///
    /// Margins are in native lines. Nothing is sent when they exceed the panel height.
    pub fn set_scroll_margins(&mut self, top: u16, bottom: u16) -> Result<(), DI::Error> {
        let fixed = match top.checked_add(bottom) {
            Some(fixed) if fixed <= S::HEIGHT => fixed,
            _ => {
                debug!("scroll margins {} + {} ignored", top, bottom);
                return Ok(());
            }
        };
        let middle = S::HEIGHT - fixed;

        let [t0, t1] = top.to_be_bytes();
        let [m0, m1] = middle.to_be_bytes();
        let [b0, b1] = bottom.to_be_bytes();
        self.interface.send_command_data(
            Command::VerticalScrollDefine as u8,
            &[t0, t1, m0, m1, b0, b1],
        )
    }

    /// Program the `w` x `h` window at (x, y) and start a memory write.
    ///
    /// Every data byte after this is pixel data until the window is full.
    pub fn set_address_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), DI::Error> {
        let x_end = x.wrapping_add(w).wrapping_sub(1);
        let y_end = y.wrapping_add(h).wrapping_sub(1);

        let [x0, x1] = x.to_be_bytes();
        let [x2, x3] = x_end.to_be_bytes();
        self.interface
            .send_command_data(Command::ColumnAddressSet as u8, &[x0, x1, x2, x3])?;

        let [y0, y1] = y.to_be_bytes();
        let [y2, y3] = y_end.to_be_bytes();
        self.interface
            .send_command_data(Command::PageAddressSet as u8, &[y0, y1, y2, y3])?;

        self.interface.send_command(Command::MemoryWrite as u8)
    }

    /// Draw one pixel, silently skipped outside the panel.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), DI::Error> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Ok(());
        }
        self.set_address_window(x as u16, y as u16, 1, 1)?;
        self.interface.send_data(&color.to_be_bytes())
    }

    pub fn fill_rectangle(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: u16,
    ) -> Result<(), DI::Error> {
        self.set_address_window(x, y, w, h)?;
        self.interface.send_repeated_pixel(color, w as u32 * h as u32)
    }

    /// Fill the whole panel at the current rotation.
    pub fn fill_screen(&mut self, color: u16) -> Result<(), DI::Error> {
        self.fill_rectangle(0, 0, self.width, self.height, color)
    }

    /// Stream colors into the `w` x `h` window at (x, y), row by row.
    pub fn draw_pixels<I>(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        colors: I,
    ) -> Result<(), DI::Error>
    where
        I: IntoIterator<Item = u16>,
    {
        self.set_address_window(x, y, w, h)?;
        self.interface
            .send_pixels(colors.into_iter().take(w as usize * h as usize))?;
        Ok(())
    }

    /// Bresenham line, both end points included.
    ///
    /// Any i32 end points are accepted. The walk only covers the part of the
    /// major axis that lies on the panel, the pixels picked are the same as for
    /// a full walk.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: u16,
    ) -> Result<(), DI::Error> {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };

        let limit = i64::from(if steep { self.height } else { self.width });
        let start = x0.max(0);
        let end = x1.min(limit - 1);
        if start > end {
            return Ok(());
        }

        // fast-forward the accumulator over the `k` skipped steps,
        // `m` of which moved y
        let k = (start - x0) as i128;
        let half = (dx / 2) as i128;
        let m = if k * dy as i128 > half {
            (k * dy as i128 - half + dx as i128 - 1) / dx as i128
        } else {
            0
        };
        let mut err = (half - k * dy as i128 + m * dx as i128) as i64;
        let mut y = y0 + ystep * m as i64;

        for x in start..=end {
            // x is on the panel, y lies between the i32 end points
            if steep {
                self.draw_pixel(y as i32, x as i32, color)?;
            } else {
                self.draw_pixel(x as i32, y as i32, color)?;
            }
            err -= dy;
            if err < 0 {
                y += ystep;
                err += dx;
            }
        }

        Ok(())
    }
}
