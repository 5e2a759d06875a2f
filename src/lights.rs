/*
 * The light driver.
 *
 * This owns the six lamp outputs and is the only code that touches them. Every
 * call drives all six lamps: first everything off, then the lamps the phase
 * asks for. That way no stale lamp from an earlier phase can survive and two
 * legs can never show a conflicting aspect after a call returns.
 *
 * Output errors are not handled here. They are passed back to the caller,
 * which must treat them as fatal.
 */

use embedded_hal::digital::{OutputPin, PinState};
use enum_ordinalize::Ordinalize;

use crate::trafficlight::{Leg, Phase};

#[derive(Ordinalize, Debug, PartialEq, Eq, Copy, Clone)]
#[repr(usize)]
pub enum Lamp {
    ARed,
    AAmber,
    AGreen,
    BRed,
    BAmber,
    BGreen,
}

impl Lamp {
    pub fn red(leg: Leg) -> Lamp {
        match leg {
            Leg::A => Lamp::ARed,
            Leg::B => Lamp::BRed,
        }
    }

    pub fn amber(leg: Leg) -> Lamp {
        match leg {
            Leg::A => Lamp::AAmber,
            Leg::B => Lamp::BAmber,
        }
    }

    pub fn green(leg: Leg) -> Lamp {
        match leg {
            Leg::A => Lamp::AGreen,
            Leg::B => Lamp::BGreen,
        }
    }
}

pub type Pattern = [bool; Lamp::VARIANT_COUNT];

pub fn pattern(phase: Phase) -> Pattern {
    let mut lamps = [false; Lamp::VARIANT_COUNT];
    for leg in [Leg::A, Leg::B] {
        lamps[Lamp::red(leg).ordinal()] = phase.red(leg);
        lamps[Lamp::amber(leg).ordinal()] = phase.amber(leg);
        lamps[Lamp::green(leg).ordinal()] = phase.green(leg);
    }
    lamps
}

/// Both legs red, nothing else. What we fall back to when things go wrong.
pub const ALL_RED: Pattern = [true, false, false, true, false, false];

pub struct LightDriver<P> {
    pins: [P; Lamp::VARIANT_COUNT],
    active_lows: [bool; Lamp::VARIANT_COUNT],
    lit: Pattern,
}

impl<P: OutputPin> LightDriver<P> {
    /// Pins in `Lamp` order, all lamps active-high.
    pub fn new(pins: [P; Lamp::VARIANT_COUNT]) -> Self {
        Self::with_active_lows(pins, [false; Lamp::VARIANT_COUNT])
    }

    pub fn with_active_lows(
        pins: [P; Lamp::VARIANT_COUNT],
        active_lows: [bool; Lamp::VARIANT_COUNT],
    ) -> Self {
        LightDriver {
            pins,
            active_lows,
            lit: [false; Lamp::VARIANT_COUNT],
        }
    }

    pub fn apply(&mut self, phase: Phase) -> Result<(), P::Error> {
        self.drive(pattern(phase))
    }

    pub fn all_red(&mut self) -> Result<(), P::Error> {
        self.drive(ALL_RED)
    }

    pub fn is_lit(&self, lamp: Lamp) -> bool {
        self.lit[lamp.ordinal()]
    }

    pub fn lit(&self) -> Pattern {
        self.lit
    }

    #[cfg(test)]
    pub(crate) fn pins(&self) -> &[P; Lamp::VARIANT_COUNT] {
        &self.pins
    }

    fn drive(&mut self, lamps: Pattern) -> Result<(), P::Error> {
        for lamp in Lamp::VARIANTS {
            self.set(*lamp, false)?;
        }
        for lamp in Lamp::VARIANTS {
            if lamps[lamp.ordinal()] {
                self.set(*lamp, true)?;
            }
        }
        Ok(())
    }

    fn set(&mut self, lamp: Lamp, on: bool) -> Result<(), P::Error> {
        let i = lamp.ordinal();
        self.pins[i].set_state(PinState::from(on != self.active_lows[i]))?;
        self.lit[i] = on;
        Ok(())
    }
}
