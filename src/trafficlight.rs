/*
 * The phase table of the crossing.
 *
 * The crossing has two legs, A and B, and cycles through four phases. In each
 * phase exactly one leg shows green or amber while the other leg shows red.
 */

use embassy_time::Duration;
use enum_ordinalize::Ordinalize;

use crate::config::Timings;

#[derive(Ordinalize, Debug, PartialEq, Eq, Copy, Clone)]
#[repr(usize)]
pub enum Leg {
    A,
    B,
}

impl Leg {
    pub fn other(self) -> Leg {
        match self {
            Leg::A => Leg::B,
            Leg::B => Leg::A,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Phase {
    AGreen,
    AYellow,
    BGreen,
    BYellow,
}

impl Phase {
    pub const INITIAL: Phase = Phase::AGreen;

    /*
     * Determine the next phase in the cycle, without changing anything.
     */
    pub fn next(self) -> Phase {
        match self {
            Phase::AGreen => Phase::AYellow,
            Phase::AYellow => Phase::BGreen,
            Phase::BGreen => Phase::BYellow,
            Phase::BYellow => Phase::AGreen,
        }
    }

    pub fn green_for(leg: Leg) -> Phase {
        match leg {
            Leg::A => Phase::AGreen,
            Leg::B => Phase::BGreen,
        }
    }

    pub fn yellow_for(leg: Leg) -> Phase {
        match leg {
            Leg::A => Phase::AYellow,
            Leg::B => Phase::BYellow,
        }
    }

    /// The leg that is allowed to move (green or amber) in this phase.
    pub fn moving_leg(self) -> Leg {
        match self {
            Phase::AGreen | Phase::AYellow => Leg::A,
            Phase::BGreen | Phase::BYellow => Leg::B,
        }
    }

    pub fn duration(self, timings: &Timings) -> Duration {
        match self {
            Phase::AGreen | Phase::BGreen => timings.green,
            Phase::AYellow | Phase::BYellow => timings.yellow,
        }
    }

    pub fn red(self, leg: Leg) -> bool {
        self.moving_leg() != leg
    }

    pub fn amber(self, leg: Leg) -> bool {
        match self {
            Phase::AYellow | Phase::BYellow => self.moving_leg() == leg,
            Phase::AGreen | Phase::BGreen => false,
        }
    }

    pub fn green(self, leg: Leg) -> bool {
        match self {
            Phase::AGreen | Phase::BGreen => self.moving_leg() == leg,
            Phase::AYellow | Phase::BYellow => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::AGreen => "A GREEN",
            Phase::AYellow => "A YELLOW",
            Phase::BGreen => "B GREEN",
            Phase::BYellow => "B YELLOW",
        }
    }
}
