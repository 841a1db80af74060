//! Real-time step scheduler.
//!
//! The driver does not own a clock or a timer. The host calls
//! [`Driver::fire`] once per display refresh with the current time and the
//! [`Tick`] it got from the previous call; the driver measures the elapsed
//! time, steps the world and hands back the next tick.
//!
//! Cancellation works by generation: [`Driver::stop`] bumps the generation,
//! and any tick issued before that is ignored when fired.

use crate::{
    types::Bounds,
    world::{Frame, World},
};
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DriverState {
    #[default]
    Idle,
    Running {
        /// Host time in seconds of the previous tick.
        last_tick: f64,
    },
}

/// Permission to run one scheduled step.
///
/// Deliberately not `Clone`: each tick can be fired at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a dropped tick ends the step loop"]
pub struct Tick {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Driver {
    state: DriverState,
    generation: u64,
    steps: u64,
    /// Set once [`Driver::sync`] has started the driver.
    synced: bool,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Number of steps run since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Enters `Running` and schedules the first tick.
    ///
    /// Returns `None` if already running, so calling it again is harmless.
    pub fn start(&mut self, now: f64) -> Option<Tick> {
        if self.is_running() {
            return None;
        }
        self.state = DriverState::Running { last_tick: now };
        debug!(generation = self.generation, "driver started");
        Some(Tick {
            generation: self.generation,
        })
    }

    /// Starts the driver the first time the session is released.
    ///
    /// Does nothing while `released` is false and on every call after the
    /// first start, so a later [`Driver::stop`] is not undone. Only an
    /// explicit [`Driver::start`] resumes a stopped driver.
    pub fn sync(&mut self, released: bool, now: f64) -> Option<Tick> {
        if !released || self.synced {
            return None;
        }
        self.synced = true;
        self.start(now)
    }

    /// Returns to `Idle` and invalidates every outstanding tick.
    ///
    /// Calling it while already idle has no further effect.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = DriverState::Idle;
        self.generation += 1;
        debug!(generation = self.generation, "driver stopped");
    }

    /// Runs one scheduled step.
    ///
    /// ### Parameters
    /// - `tick` - The token from [`Driver::start`] or the previous `fire`.
    /// - `now` - Current host time in seconds.
    /// - `world` - The world to step.
    /// - `bounds` - Container size at this instant.
    ///
    /// ### Returns
    /// The frame produced by the step and the next tick, or `None` if the
    /// tick is stale (the driver was stopped after it was issued).
    pub fn fire(
        &mut self,
        tick: Tick,
        now: f64,
        world: &mut World,
        bounds: Bounds,
    ) -> Option<(Frame, Tick)> {
        let DriverState::Running { last_tick } = self.state else {
            trace!("tick fired while idle");
            return None;
        };
        if tick.generation != self.generation {
            trace!(
                stale = tick.generation,
                current = self.generation,
                "dropping stale tick"
            );
            return None;
        }

        // The world clamps this; a backwards clock just yields the minimum step.
        let dt = (now - last_tick) as f32;
        self.state = DriverState::Running { last_tick: now };
        self.steps += 1;

        let frame = world.step(dt, bounds);
        Some((frame, tick))
    }
}
