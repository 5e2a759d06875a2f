/*
 * Compile-time configuration of the crossing.
 *
 * None of this is reconfigurable at runtime. Change the constants and rebuild.
 */

use embassy_time::Duration;

use crate::trafficlight::Leg;

pub const GREEN_MS: u64 = 3000;
pub const YELLOW_MS: u64 = 1000;
pub const DEBOUNCE_MS: u64 = 75;
pub const MIN_HOLD_MS: u64 = 800;
pub const RAW_DUMP_MS: u64 = 500;

// How long the main loop yields between ticks. Must stay well below the
// debounce interval, or debouncing and hold timing lose precision.
pub const TICK_MS: u64 = 5;
pub const TICK_INTERVAL: Duration = Duration::from_millis(TICK_MS);
const _: () = assert!(TICK_MS < DEBOUNCE_MS);

/// Which raw level means "something is in front of the sensor".
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SensorPolarity {
    ActiveLow,
    ActiveHigh,
}

impl SensorPolarity {
    pub const fn detects(self, raw_high: bool) -> bool {
        match self {
            SensorPolarity::ActiveLow => !raw_high,
            SensorPolarity::ActiveHigh => raw_high,
        }
    }

    /// The raw level a sensor with this polarity shows for `detected`.
    pub const fn level(self, detected: bool) -> bool {
        match self {
            SensorPolarity::ActiveLow => !detected,
            SensorPolarity::ActiveHigh => detected,
        }
    }
}

// Most IR obstacle modules pull their output low on detection. If yours pulls
// high, change it here and drop the pull-up in `io.rs`.
pub const SENSOR_A_POLARITY: SensorPolarity = SensorPolarity::ActiveLow;
pub const SENSOR_B_POLARITY: SensorPolarity = SensorPolarity::ActiveLow;

pub const fn sensor_polarity(leg: Leg) -> SensorPolarity {
    match leg {
        Leg::A => SENSOR_A_POLARITY,
        Leg::B => SENSOR_B_POLARITY,
    }
}

/// All the durations the controller works with.
#[derive(Debug, Copy, Clone)]
pub struct Timings {
    pub green: Duration,
    pub yellow: Duration,
    pub debounce: Duration,
    pub min_hold: Duration,
    pub raw_dump: Duration,
}

impl Timings {
    pub const DEFAULT: Timings =
        Timings::new(GREEN_MS, YELLOW_MS, DEBOUNCE_MS, MIN_HOLD_MS, RAW_DUMP_MS);

    /*
     * The hold interval only makes sense if it covers at least one debounce
     * interval, otherwise a sensor that settles and unsettles could still make
     * the lights flap. Used in a `const`, a violation fails the build.
     */
    pub const fn new(
        green_ms: u64,
        yellow_ms: u64,
        debounce_ms: u64,
        min_hold_ms: u64,
        raw_dump_ms: u64,
    ) -> Self {
        assert!(min_hold_ms >= debounce_ms, "minimum hold must cover debounce");

        Timings {
            green: Duration::from_millis(green_ms),
            yellow: Duration::from_millis(yellow_ms),
            debounce: Duration::from_millis(debounce_ms),
            min_hold: Duration::from_millis(min_hold_ms),
            raw_dump: Duration::from_millis(raw_dump_ms),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Timings::DEFAULT
    }
}
