//! Recording doubles for the bus, the control lines and the delay.
//!
//! All doubles built from one [`Recorder`] log into the same ordered event list,
//! so tests can check D/C phases, reset pulses and delays against each other.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

use crate::interface::{NoResetPin, SPIInterface};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Write { dc: bool, bytes: Vec<u8> },
    Reset(bool),
    DelayUs(u32),
}

impl Event {
    pub fn write(dc: bool, bytes: &[u8]) -> Self {
        Event::Write {
            dc,
            bytes: bytes.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusFault;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinFault;

#[derive(Default)]
struct State {
    dc: bool,
    events: Vec<Event>,
}

#[derive(Clone, Default)]
pub struct Recorder {
    state: Rc<RefCell<State>>,
}

pub struct MockSpi {
    state: Rc<RefCell<State>>,
    /// Transfers accepted before every further one fails.
    budget: Option<usize>,
}

pub struct MockDcPin {
    state: Rc<RefCell<State>>,
    /// Level changes accepted before every further one fails.
    budget: Option<usize>,
}

pub struct MockResetPin {
    state: Rc<RefCell<State>>,
}

pub struct MockDelay {
    state: Rc<RefCell<State>>,
}

pub type MockInterface = SPIInterface<MockSpi, MockDcPin, MockResetPin>;
pub type MockInterfaceNoReset = SPIInterface<MockSpi, MockDcPin, NoResetPin>;

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn spi(&self, budget: Option<usize>) -> MockSpi {
        MockSpi {
            state: self.state.clone(),
            budget,
        }
    }

    fn dc(&self, budget: Option<usize>) -> MockDcPin {
        MockDcPin {
            state: self.state.clone(),
            budget,
        }
    }

    fn rst(&self) -> MockResetPin {
        MockResetPin {
            state: self.state.clone(),
        }
    }

    pub fn interface(&self) -> MockInterface {
        SPIInterface::new(self.spi(None), self.dc(None), self.rst())
    }

    pub fn interface_no_reset(&self) -> MockInterfaceNoReset {
        SPIInterface::new_no_reset(self.spi(None), self.dc(None))
    }

    /// Interface whose bus fails from the `n + 1`th transfer on.
    pub fn failing_interface(&self, n: usize) -> MockInterface {
        SPIInterface::new(self.spi(Some(n)), self.dc(None), self.rst())
    }

    /// Interface whose D/C line fails from the `n + 1`th level change on.
    pub fn failing_dc_interface(&self, n: usize) -> MockInterface {
        SPIInterface::new(self.spi(None), self.dc(Some(n)), self.rst())
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: self.state.clone(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.state.borrow_mut().events.clear();
    }

    /// Every byte put on the bus, regardless of phase.
    pub fn bytes(&self) -> Vec<u8> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Write { bytes, .. } => Some(bytes.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Bus traffic grouped into (opcode, concatenated data) frames.
    pub fn frames(&self) -> Vec<(u8, Vec<u8>)> {
        let mut frames: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in self.state.borrow().events.iter() {
            match event {
                Event::Write { dc: false, bytes } => {
                    for &b in bytes {
                        frames.push((b, Vec::new()));
                    }
                }
                Event::Write { dc: true, bytes } => {
                    let frame = frames.last_mut().expect("data before any command");
                    frame.1.extend_from_slice(bytes);
                }
                _ => {}
            }
        }
        frames
    }

    pub fn delays(&self) -> Vec<u32> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::DelayUs(us) => Some(*us),
                _ => None,
            })
            .collect()
    }
}

impl Write<u8> for MockSpi {
    type Error = BusFault;

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        match self.budget.as_mut() {
            Some(0) => return Err(BusFault),
            Some(n) => *n -= 1,
            None => {}
        }
        let mut state = self.state.borrow_mut();
        let dc = state.dc;
        state.events.push(Event::write(dc, words));
        Ok(())
    }
}

impl MockDcPin {
    fn set(&mut self, high: bool) -> Result<(), PinFault> {
        match self.budget.as_mut() {
            Some(0) => return Err(PinFault),
            Some(n) => *n -= 1,
            None => {}
        }
        self.state.borrow_mut().dc = high;
        Ok(())
    }
}

impl OutputPin for MockDcPin {
    type Error = PinFault;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

impl OutputPin for MockResetPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().events.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().events.push(Event::Reset(true));
        Ok(())
    }
}

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.state.borrow_mut().events.push(Event::DelayUs(us));
    }
}
