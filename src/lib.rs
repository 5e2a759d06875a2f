#![cfg_attr(not(test), no_std)]

/*
 * Controller logic for a two-leg crossing with presence sensors.
 *
 * Everything in here is free of device specifics: time comes in as
 * `embassy_time::Instant` values, sensors come in as raw levels and lamps go
 * out through `embedded_hal` output pins. The firmware binary wires this up to
 * the actual board and runs `Controller::tick` from its main loop.
 */

pub mod arbiter;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod diagnostics;
pub mod lights;
pub mod trafficlight;

#[cfg(test)]
mod testing;

pub use controller::Controller;
pub use trafficlight::{Leg, Phase};
