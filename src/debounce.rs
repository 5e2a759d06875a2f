/*
 * Debouncing of the presence sensors.
 *
 * IR obstacle sensors chatter when something is at the edge of their range. A
 * raw level only becomes the stable value after it has held steady for the
 * debounce interval. This runs inside the control loop, one call per tick, so
 * unlike a timer-driven debouncer it never waits on anything.
 */

use embassy_time::{Duration, Instant};

use crate::config::SensorPolarity;

#[derive(Debug, Clone)]
pub struct Debouncer {
    polarity: SensorPolarity,
    debounce: Duration,
    raw: bool,
    raw_changed_at: Instant,
    stable: bool,
}

impl Debouncer {
    /// Seed straight from a single raw read, there is no settling at boot.
    pub fn new(polarity: SensorPolarity, debounce: Duration, raw: bool, now: Instant) -> Self {
        Debouncer {
            polarity,
            debounce,
            raw,
            raw_changed_at: now,
            stable: polarity.detects(raw),
        }
    }

    pub fn stable(&self) -> bool {
        self.stable
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    /*
     * Feed one raw reading. Returns the new stable value if it flipped on this
     * call. A reading that differs from the previous one only restarts the
     * settling timer.
     */
    pub fn update(&mut self, raw: bool, now: Instant) -> Option<bool> {
        if raw != self.raw {
            self.raw = raw;
            self.raw_changed_at = now;
            return None;
        }

        if now.saturating_duration_since(self.raw_changed_at) < self.debounce {
            return None;
        }

        let detected = self.polarity.detects(raw);
        if detected == self.stable {
            return None;
        }

        self.stable = detected;
        Some(detected)
    }
}
