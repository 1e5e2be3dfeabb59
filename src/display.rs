//! Panel geometry and orientation.

use crate::command::madctl::{BGR, MV, MX, MY};

/// Rotation of the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayRotation {
    /// No rotation, portrait
    Rotate0,
    /// Rotate by 90 degress clockwise, landscape
    Rotate90,
    /// Rotate by 180 degress clockwise
    Rotate180,
    /// Rotate 270 degress clockwise
    Rotate270,
}

impl DisplayRotation {
    /// Memory access control value for this rotation, always in BGR order.
    pub fn madctl(self) -> u8 {
        match self {
            DisplayRotation::Rotate0 => MX | BGR,
            DisplayRotation::Rotate90 => MV | BGR,
            DisplayRotation::Rotate180 => MY | BGR,
            DisplayRotation::Rotate270 => MX | MY | MV | BGR,
        }
    }

    /// Row / column exchanged, width and height swap.
    pub fn is_landscape(self) -> bool {
        matches!(self, DisplayRotation::Rotate90 | DisplayRotation::Rotate270)
    }

    /// Logical (width, height) of a panel of native size `width` x `height`.
    pub fn dimensions(self, width: u16, height: u16) -> (u16, u16) {
        if self.is_landscape() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl Default for DisplayRotation {
    fn default() -> Self {
        DisplayRotation::Rotate0
    }
}

/// Rotation index, wraps modulo 4.
impl From<u8> for DisplayRotation {
    fn from(r: u8) -> Self {
        match r % 4 {
            0 => DisplayRotation::Rotate0,
            1 => DisplayRotation::Rotate90,
            2 => DisplayRotation::Rotate180,
            _ => DisplayRotation::Rotate270,
        }
    }
}

/// Trait that defines display size information
pub trait DisplaySize {
    /// Native width in pixels
    const WIDTH: u16;
    /// Native height in pixels, also the number of scrollable lines
    const HEIGHT: u16;
}

/// 2.2" / 2.4" / 2.8" ILI9341 panels
#[derive(Clone, Copy, Debug)]
pub struct DisplaySize240x320;

impl DisplaySize for DisplaySize240x320 {
    const WIDTH: u16 = 240;
    const HEIGHT: u16 = 320;
}
