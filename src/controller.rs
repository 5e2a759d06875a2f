/*
 * The crossing controller.
 *
 * One `Controller` owns all the state of the crossing: both sensor debouncers,
 * the override state and the current phase. The main loop calls `tick` as
 * often as it can. A tick reads the clock once, debounces both sensors, lets
 * the arbiter decide and then either applies the override decision or runs
 * the regular cycle. Nothing in a tick waits.
 */

use embassy_time::Instant;
use embedded_hal::digital::OutputPin;
use enum_ordinalize::Ordinalize;

use crate::arbiter::{Decision, OverrideState};
use crate::config::{Timings, sensor_polarity};
use crate::debounce::Debouncer;
use crate::diagnostics::{Diagnostics, Event};
use crate::lights::LightDriver;
use crate::trafficlight::{Leg, Phase};

pub struct Controller {
    timings: Timings,
    sensors: [Debouncer; Leg::VARIANT_COUNT],
    overrides: OverrideState,
    phase: Phase,
    phase_entered_at: Instant,
    last_dump_at: Instant,
}

impl Controller {
    /*
     * Bring the crossing up: seed the sensors from one raw read each, show the
     * first phase of the cycle and report.
     */
    pub fn start<P: OutputPin, D: Diagnostics>(
        timings: Timings,
        now: Instant,
        raw_a: bool,
        raw_b: bool,
        lights: &mut LightDriver<P>,
        diagnostics: &mut D,
    ) -> Result<Self, P::Error> {
        let sensor = |leg: Leg, raw: bool| {
            Debouncer::new(sensor_polarity(leg), timings.debounce, raw, now)
        };
        let controller = Controller {
            timings,
            sensors: [sensor(Leg::A, raw_a), sensor(Leg::B, raw_b)],
            overrides: OverrideState::new(),
            phase: Phase::INITIAL,
            phase_entered_at: now,
            last_dump_at: now,
        };

        lights.apply(controller.phase)?;
        diagnostics.emit(Event::Started {
            stable_a: controller.stable(Leg::A),
            stable_b: controller.stable(Leg::B),
        });

        Ok(controller)
    }

    pub fn tick<P: OutputPin, D: Diagnostics>(
        &mut self,
        now: Instant,
        raw_a: bool,
        raw_b: bool,
        lights: &mut LightDriver<P>,
        diagnostics: &mut D,
    ) -> Result<Decision, P::Error> {
        for (leg, raw) in [(Leg::A, raw_a), (Leg::B, raw_b)] {
            if let Some(on) = self.sensors[leg.ordinal()].update(raw, now) {
                diagnostics.emit(Event::SensorStable { leg, on });
            }
        }

        if now.saturating_duration_since(self.last_dump_at) > self.timings.raw_dump {
            diagnostics.emit(Event::RawDump {
                raw_a: self.sensors[Leg::A.ordinal()].raw(),
                stable_a: self.stable(Leg::A),
                raw_b: self.sensors[Leg::B.ordinal()].raw(),
                stable_b: self.stable(Leg::B),
            });
            self.last_dump_at = now;
        }

        let decision = self.overrides.decide(
            self.stable(Leg::A),
            self.stable(Leg::B),
            now,
            self.timings.min_hold,
        );

        match decision {
            // abrupt, straight to green without amber
            Decision::Preempt(request) => {
                self.enter(Phase::green_for(request.leg), now, lights)?;
                diagnostics.emit(Event::Override {
                    leg: request.leg,
                    tie: request.tie,
                });
            }
            Decision::EndOverride(leg) => {
                self.enter(Phase::yellow_for(leg), now, lights)?;
                diagnostics.emit(Event::OverrideEnded { leg });
            }
            Decision::HoldOverride => {}
            Decision::Continue => self.cycle(now, lights, diagnostics)?,
        }
        self.overrides.commit(decision, now);

        Ok(decision)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_entered_at(&self) -> Instant {
        self.phase_entered_at
    }

    pub fn override_owner(&self) -> Option<Leg> {
        self.overrides.owner()
    }

    pub fn stable(&self, leg: Leg) -> bool {
        self.sensors[leg.ordinal()].stable()
    }

    fn cycle<P: OutputPin, D: Diagnostics>(
        &mut self,
        now: Instant,
        lights: &mut LightDriver<P>,
        diagnostics: &mut D,
    ) -> Result<(), P::Error> {
        let elapsed = now.saturating_duration_since(self.phase_entered_at);
        if elapsed < self.phase.duration(&self.timings) {
            return Ok(());
        }

        self.enter(self.phase.next(), now, lights)?;
        diagnostics.emit(Event::PhaseChanged { phase: self.phase });
        Ok(())
    }

    fn enter<P: OutputPin>(
        &mut self,
        phase: Phase,
        now: Instant,
        lights: &mut LightDriver<P>,
    ) -> Result<(), P::Error> {
        lights.apply(phase)?;
        self.phase = phase;
        self.phase_entered_at = now;
        Ok(())
    }
}
