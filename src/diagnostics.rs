/*
 * Diagnostic events.
 *
 * The controller reports what it does as typed events. Where they end up is up
 * to the sink. On the board the sink is a channel that a separate task drains
 * to the serial port. Emitting must never block the control loop, so the
 * channel sink simply drops events when the channel is full.
 */

use core::fmt::{self, Display, Formatter, Write};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use heapless::String;

use crate::trafficlight::{Leg, Phase};

pub const LINE_CAPACITY: usize = 96;
pub const CHANNEL_CAPACITY: usize = 8;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Event {
    Started {
        stable_a: bool,
        stable_b: bool,
    },
    SensorStable {
        leg: Leg,
        on: bool,
    },
    RawDump {
        raw_a: bool,
        stable_a: bool,
        raw_b: bool,
        stable_b: bool,
    },
    Override {
        leg: Leg,
        // both legs were asking, and the tie went to `leg`
        tie: bool,
    },
    OverrideEnded {
        leg: Leg,
    },
    PhaseChanged {
        phase: Phase,
    },
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn leg_name(leg: Leg) -> &'static str {
    match leg {
        Leg::A => "A",
        Leg::B => "B",
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Event::Started { stable_a, stable_b } => write!(
                f,
                "Traffic controller started, initial sensors A:{} B:{}",
                on_off(stable_a),
                on_off(stable_b)
            ),
            Event::SensorStable { leg, on } => {
                write!(f, "{} stable -> {}", leg_name(leg), on_off(on))
            }
            Event::RawDump {
                raw_a,
                stable_a,
                raw_b,
                stable_b,
            } => write!(
                f,
                "RAW A:{} (STABLE {})  B:{} (STABLE {})",
                u8::from(raw_a),
                on_off(stable_a),
                u8::from(raw_b),
                on_off(stable_b)
            ),
            Event::Override { leg, tie: false } => {
                write!(f, "Override: {} GREEN (stable)", leg_name(leg))
            }
            Event::Override { leg, tie: true } => {
                write!(f, "Override: BOTH active, giving {} priority", leg_name(leg))
            }
            Event::OverrideEnded { leg } => {
                write!(f, "Override ended -> {} YELLOW", leg_name(leg))
            }
            Event::PhaseChanged { phase } => write!(f, "State -> {}", phase.name()),
        }
    }
}

impl Event {
    /// One line of text, newline included, ready for the serial port.
    pub fn render(&self) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        // every event fits comfortably; if one ever does not it is cut short
        let _ = writeln!(line, "{}", self);
        line
    }
}

pub trait Diagnostics {
    fn emit(&mut self, event: Event);
}

/// Discards everything.
pub struct Silent;

impl Diagnostics for Silent {
    fn emit(&mut self, _event: Event) {}
}

impl<M: RawMutex, const N: usize> Diagnostics for Sender<'_, M, Event, N> {
    fn emit(&mut self, event: Event) {
        // fire and forget
        let _ = self.try_send(event);
    }
}
