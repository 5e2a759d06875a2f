/*
 * The override arbiter.
 *
 * A leg whose sensor reports a stable presence gets green right away, without
 * waiting for the cycle to come round. To keep the lights from flapping
 * between the legs, a new immediate green is only given once the minimum hold
 * interval has passed since the previous one, whichever leg that was for.
 *
 * When all presence clears, the override hands control back to the cycle
 * through the amber of the leg that had it. The cycle then carries on from
 * there.
 *
 * The arbiter only decides. Applying the decision is up to the controller.
 */

use embassy_time::{Duration, Instant};

use crate::trafficlight::Leg;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Request {
    pub leg: Leg,
    pub tie: bool,
}

/*
 * Who gets the override when sensors ask for it. When both legs ask at the
 * same time, A wins, every time. This is a fixed priority and it does starve
 * B for as long as A stays occupied. Swap in another policy here; the arbiter
 * does not care how the request was picked.
 */
pub fn requested(stable_a: bool, stable_b: bool) -> Option<Request> {
    match (stable_a, stable_b) {
        (true, false) => Some(Request {
            leg: Leg::A,
            tie: false,
        }),
        (false, true) => Some(Request {
            leg: Leg::B,
            tie: false,
        }),
        (true, true) => Some(Request {
            leg: Leg::A,
            tie: true,
        }),
        (false, false) => None,
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Decision {
    /// Give `leg` green now.
    Preempt(Request),
    /// An override is in effect, or one is wanted but the hold has not expired.
    HoldOverride,
    /// Presence cleared, hand back to the cycle through this leg's amber.
    EndOverride(Leg),
    /// Nothing to do, let the cycle run.
    Continue,
}

#[derive(Debug, Clone)]
pub struct OverrideState {
    owner: Option<Leg>,
    last_switch_at: Instant,
}

impl OverrideState {
    pub fn new() -> Self {
        OverrideState {
            owner: None,
            // the clock origin, so the hold also applies right after boot
            last_switch_at: Instant::from_ticks(0),
        }
    }

    pub fn active(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<Leg> {
        self.owner
    }

    pub fn last_switch_at(&self) -> Instant {
        self.last_switch_at
    }

    /*
     * Work out what to do on this tick, without changing anything.
     */
    pub fn decide(
        &self,
        stable_a: bool,
        stable_b: bool,
        now: Instant,
        min_hold: Duration,
    ) -> Decision {
        match (requested(stable_a, stable_b), self.owner) {
            (Some(request), Some(owner)) if owner == request.leg => Decision::HoldOverride,
            (Some(request), _) => {
                if now.saturating_duration_since(self.last_switch_at) >= min_hold {
                    Decision::Preempt(request)
                } else {
                    Decision::HoldOverride
                }
            }
            (None, Some(owner)) => Decision::EndOverride(owner),
            (None, None) => Decision::Continue,
        }
    }

    /// Record a decision made by `decide`.
    pub fn commit(&mut self, decision: Decision, now: Instant) {
        match decision {
            Decision::Preempt(request) => {
                self.owner = Some(request.leg);
                self.last_switch_at = now;
            }
            Decision::EndOverride(_) => self.owner = None,
            Decision::HoldOverride | Decision::Continue => {}
        }
    }
}

impl Default for OverrideState {
    fn default() -> Self {
        Self::new()
    }
}
