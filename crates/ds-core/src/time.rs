//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Step` counter.  The mapping to wall
//! time is fixed at the start of a run:
//!
//!   due(step) = run_start + step * step_duration
//!
//! Step 0 is applied at `run_start`.  After applying step `n` the scheduler
//! waits until `due(n + 1)`, recomputing the wait from the current elapsed
//! time instead of sleeping a fixed interval.  Execution jitter therefore
//! never accumulates: a late step shortens the following wait.

use std::fmt;
use std::time::Duration;

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── Delay ─────────────────────────────────────────────────────────────────────

/// How the current wall time relates to a step's due instant.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Delay {
    /// The step is due this far in the future.
    Wait(Duration),
    /// The step was due this long ago (or exactly now).
    Late(Duration),
}

impl Delay {
    /// Time left to wait, zero when late.
    #[inline]
    pub fn remaining(self) -> Duration {
        match self {
            Delay::Wait(d) => d,
            Delay::Late(_) => Duration::ZERO,
        }
    }

    #[inline]
    pub fn is_late(self) -> bool {
        matches!(self, Delay::Late(_))
    }

    /// Signed delay in seconds: positive while waiting, non-positive when late.
    pub fn as_secs_f64(self) -> f64 {
        match self {
            Delay::Wait(d) => d.as_secs_f64(),
            Delay::Late(d) => -d.as_secs_f64(),
        }
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Maps step numbers to offsets from the start of the run.
///
/// Holds no reference to a real clock; callers pass the elapsed time so the
/// arithmetic is testable without sleeping.
#[derive(Clone, Debug)]
pub struct StepClock {
    /// Wall time one step represents.
    pub step_duration: Duration,
    /// The next step to be applied.
    pub current_step: Step,
}

impl StepClock {
    pub fn new(step_duration: Duration) -> Self {
        Self {
            step_duration,
            current_step: Step::ZERO,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = self.current_step + 1;
    }

    /// Offset from the start of the run at which `step` is due.
    pub fn due(&self, step: Step) -> Duration {
        let nanos = self.step_duration.as_nanos() * step.0 as u128;
        let secs = (nanos / 1_000_000_000) as u64;
        let sub = (nanos % 1_000_000_000) as u32;
        Duration::new(secs, sub)
    }

    /// `due(step) - elapsed`, as a [`Delay`].
    pub fn delay_until(&self, step: Step, elapsed: Duration) -> Delay {
        let due = self.due(step);
        if due > elapsed {
            Delay::Wait(due - elapsed)
        } else {
            Delay::Late(elapsed - due)
        }
    }

    /// Delay until the step the clock will apply next.
    #[inline]
    pub fn delay_to_next(&self, elapsed: Duration) -> Delay {
        self.delay_until(self.current_step, elapsed)
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.due(self.current_step);
        write!(f, "{} (+{:.3}s)", self.current_step, at.as_secs_f64())
    }
}
