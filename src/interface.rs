//! The display interface for the ILI9341.
//!
//! Every command is framed in two phases: the opcode goes out with D/C low,
//! the optional arguments follow with D/C high in one contiguous transfer.

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

/// Pixels per bus transfer when streaming colors.
const PIXEL_CHUNK: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The bus refused a transfer, carries the bus error as is.
    BusWriteError(E),
    /// The D/C line could not be driven.
    DCError,
}

/// Command/data framing towards the controller.
///
/// A command is one opcode byte sent in command phase, followed by its
/// arguments in data phase. Nothing else may go on the bus in between.
pub trait DisplayInterface {
    type Error;

    /// Send a command and its arguments. The data phase is skipped for an empty `data`.
    fn send_command_data(&mut self, command: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.send_command(command)?;
        if !data.is_empty() {
            self.send_data(data)?;
        }
        Ok(())
    }

    /// Send a command to the controller.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send data for a command.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Send 16-bit pixels, high byte first. Returns the number of pixels sent.
    fn send_pixels<I>(&mut self, pixels: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut buf = [0u8; PIXEL_CHUNK * 2];
        let mut len = 0;
        let mut n = 0;

        for pixel in pixels {
            buf[len..len + 2].copy_from_slice(&pixel.to_be_bytes());
            len += 2;
            n += 1;
            if len == buf.len() {
                self.send_data(&buf)?;
                len = 0;
            }
        }
        if len != 0 {
            self.send_data(&buf[..len])?;
        }

        Ok(n)
    }

    /// Send the same pixel `count` times.
    fn send_repeated_pixel(&mut self, pixel: u16, count: u32) -> Result<(), Self::Error> {
        self.send_pixels((0..count).map(|_| pixel))?;
        Ok(())
    }

    /// Hard reset, returns false when there is no reset line to pulse.
    fn reset<D>(&mut self, delay: &mut D, initial_delay: u32, duration: u32) -> bool
    where
        D: DelayUs<u32>;
}

/// Reset pin type of [`SPIInterface::new_no_reset`].
///
/// Only names the `RST` parameter when no reset line is wired, it is never driven.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResetPin;

impl OutputPin for NoResetPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// 4-wire SPI display interface, chip select is left to the bus.
pub struct SPIInterface<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: Option<RST>,
}

impl<SPI, DC, RST> SPIInterface<SPI, DC, RST>
where
    SPI: embedded_hal::blocking::spi::Write<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        SPIInterface {
            spi,
            dc,
            rst: Some(rst),
        }
    }

    /// Consume the display interface and return
    /// the underlying peripherial driver and GPIO pins used by it
    pub fn release(self) -> (SPI, DC, Option<RST>) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC> SPIInterface<SPI, DC, NoResetPin>
where
    SPI: embedded_hal::blocking::spi::Write<u8>,
    DC: OutputPin,
{
    /// Interface without a reset line, the controller gets a software reset instead.
    pub fn new_no_reset(spi: SPI, dc: DC) -> Self {
        SPIInterface { spi, dc, rst: None }
    }
}

impl<SPI, DC, RST> DisplayInterface for SPIInterface<SPI, DC, RST>
where
    SPI: embedded_hal::blocking::spi::Write<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    type Error = DisplayError<SPI::Error>;

    /// Send a command to the controller.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        // 1 = data, 0 = command
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        self.spi
            .write(&[command])
            .map_err(DisplayError::BusWriteError)
    }

    /// Send data for a command.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // 1 = data, 0 = command
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        self.spi.write(data).map_err(DisplayError::BusWriteError)
    }

    fn reset<D>(&mut self, delay: &mut D, initial_delay: u32, duration: u32) -> bool
    where
        D: DelayUs<u32>,
    {
        let rst = match self.rst.as_mut() {
            Some(rst) => rst,
            None => return false,
        };

        let _ = rst.set_high();
        delay.delay_us(initial_delay);

        let _ = rst.set_low();
        delay.delay_us(duration);
        let _ = rst.set_high();
        delay.delay_us(150_000);

        true
    }
}
