// Test doubles for the outputs and the diagnostics stream.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;
use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use enum_ordinalize::Ordinalize;

use crate::diagnostics::{Diagnostics, Event};
use crate::lights::{Lamp, LightDriver};

#[derive(Debug, Default)]
pub struct RecordingPin {
    high: bool,
    writes: usize,
}

impl RecordingPin {
    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

pub fn pins() -> [RecordingPin; Lamp::VARIANT_COUNT] {
    Default::default()
}

pub fn driver() -> LightDriver<RecordingPin> {
    LightDriver::new(pins())
}

#[derive(Debug, PartialEq, Eq)]
pub struct PinBroken;

impl digital::Error for PinBroken {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// Clones share the broken flag, so a test can keep a handle on a pin it has
// handed to the driver and break it later.
#[derive(Debug, Default, Clone)]
pub struct FailingPin {
    broken: Rc<Cell<bool>>,
}

impl FailingPin {
    pub fn ok() -> Self {
        FailingPin::default()
    }

    pub fn failing() -> Self {
        let pin = FailingPin::ok();
        pin.break_now();
        pin
    }

    pub fn break_now(&self) {
        self.broken.set(true);
    }

    fn write(&self) -> Result<(), PinBroken> {
        if self.broken.get() { Err(PinBroken) } else { Ok(()) }
    }
}

impl ErrorType for FailingPin {
    type Error = PinBroken;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write()
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|event| event.to_string()).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines().iter().filter(|line| line.contains(needle)).count()
    }
}

impl Diagnostics for Recorder {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
