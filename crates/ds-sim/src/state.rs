//! `SimState` — the simulation context shared by the scheduler and the
//! request handlers.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use ds_core::{Delay, DoorId, SimConfig, Step, StepClock};
use ds_door::{Door, DoorModel};
use ds_scenario::{Scenario, ScenarioPlayer};

use crate::record::{DoorStepRecord, ResultRow, ScenarioRow, StepRecord, StepReport};
use crate::{SimError, SimResult};

// ── RunState ──────────────────────────────────────────────────────────────────

/// Lifecycle of a run.
///
/// `Running → Stopping → Stopped` on a requested shutdown;
/// `Running → Halted` on any step failure.  Only `Running` accepts requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopping,
    Stopped,
    Halted(String),
}

impl RunState {
    /// `Ok` while running, otherwise the rejection handed to callers.
    pub fn check(&self) -> SimResult<()> {
        match self {
            RunState::Running => Ok(()),
            RunState::Stopping | RunState::Stopped => Err(SimError::Stopped),
            RunState::Halted(reason) => Err(SimError::Halted(reason.clone())),
        }
    }
}

// ── DoorSlot ──────────────────────────────────────────────────────────────────

/// A door together with the scenario feeding it.
#[derive(Clone, Debug)]
pub struct DoorSlot {
    pub name:   String,
    pub door:   Door,
    pub player: ScenarioPlayer,
}

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What [`SimState::advance`] hands back to the scheduler for the work it
/// does outside the lock.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub record:      StepRecord,
    /// Not yet in the in-memory log; see [`SimState::push_result`].
    pub result:      ResultRow,
    /// Scenario switches that happened this step (already logged in memory).
    pub transitions: Vec<ScenarioRow>,
    /// Time until the next step is due.
    pub delay:       Delay,
}

// ── SimState ──────────────────────────────────────────────────────────────────

/// All mutable simulation state.
///
/// Created by [`SimBuilder`][crate::SimBuilder] and owned by a
/// [`SimHandle`][crate::SimHandle].
#[derive(Debug)]
pub struct SimState {
    pub config:  SimConfig,
    pub clock:   StepClock,
    run_start:   Instant,
    doors:       Vec<DoorSlot>,
    last_step:   Option<StepRecord>,
    results:     Vec<ResultRow>,
    transitions: Vec<ScenarioRow>,
    run_state:   RunState,
}

impl SimState {
    pub(crate) fn new(config: SimConfig, doors: Vec<DoorSlot>) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            run_start: Instant::now(),
            doors,
            last_step: None,
            results: Vec::new(),
            transitions: Vec::new(),
            run_state: RunState::Running,
        }
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Re-anchor step 0 at `now`.  Called once when the scheduler starts, so
    /// time spent connecting hardware is not counted as lateness.
    pub fn restart_clock(&mut self, now: Instant) {
        self.run_start = now;
    }

    pub fn run_start(&self) -> Instant {
        self.run_start
    }

    pub fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.run_start)
    }

    /// Wall-clock instant at which the next step is due.
    pub fn next_deadline(&self) -> Instant {
        self.run_start + self.clock.due(self.clock.current_step)
    }

    // ── Run state ─────────────────────────────────────────────────────────

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub(crate) fn set_run_state(&mut self, next: RunState) {
        if self.run_state != next {
            debug!(from = ?self.run_state, to = ?next, "run state change");
        }
        self.run_state = next;
    }

    // ── Doors ─────────────────────────────────────────────────────────────

    pub fn doors(&self) -> &[DoorSlot] {
        &self.doors
    }

    pub fn door_id(&self, name: &str) -> SimResult<DoorId> {
        self.doors
            .iter()
            .position(|slot| slot.name == name)
            .and_then(|i| DoorId::try_from(i).ok())
            .ok_or_else(|| SimError::UnknownDoor(name.to_owned()))
    }

    /// One more person waiting at `id`.  Takes effect on the next step.
    pub fn arrive(&mut self, id: DoorId) -> SimResult<()> {
        self.run_state.check()?;
        self.doors[id.index()].door.add_arrivals(1);
        Ok(())
    }

    /// Queue `scenario` on `id`'s player for the next cycle boundary.
    pub fn queue_scenario(&mut self, id: DoorId, name: &str, scenario: Scenario) -> SimResult<()> {
        self.run_state.check()?;
        self.doors[id.index()].player.queue(name, scenario)?;
        Ok(())
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Apply one step to every door.
    ///
    /// `elapsed` is the wall time since `run_start`; it stamps the log rows
    /// and decides how long until the next step.  `telemetry` is the
    /// actuator's report for this step (empty without an actuator).
    pub fn advance(&mut self, elapsed: Duration, telemetry: Vec<i64>) -> SimResult<StepOutcome> {
        self.run_state.check()?;

        let step = self.clock.current_step;
        let elapsed_secs = elapsed.as_secs_f64();
        let mut doors = Vec::with_capacity(self.doors.len());
        let mut arrivals = Vec::with_capacity(self.doors.len());
        let mut transitions = Vec::new();

        for slot in &mut self.doors {
            let before = slot.door.snapshot();

            let (arrived, switch) = slot.player.arrivals_at(step);
            if let Some(switch) = switch {
                info!(door = %slot.name, scenario = %switch.name, %step, "scenario started");
                transitions.push(ScenarioRow {
                    elapsed_secs,
                    door:     slot.name.clone(),
                    scenario: switch.name,
                });
            }

            slot.door.add_arrivals(arrived);
            let moved = slot.door.step();

            arrivals.push(arrived);
            doors.push(DoorStepRecord {
                door: slot.name.clone(),
                arrived,
                before,
                motion: slot.door.motion(moved),
            });
        }

        let record = StepRecord { step, doors };
        self.transitions.extend(transitions.iter().cloned());
        self.last_step = Some(record.clone());
        self.clock.advance();

        Ok(StepOutcome {
            record,
            result: ResultRow { elapsed_secs, arrivals, telemetry },
            transitions,
            delay: self.clock.delay_to_next(elapsed),
        })
    }

    /// Append a finished step's row to the in-memory result log.
    pub fn push_result(&mut self, row: ResultRow) {
        self.results.push(row);
    }

    // ── Reporting ─────────────────────────────────────────────────────────

    /// The latest step plus how long until the next one, in milliseconds.
    pub fn step_report(&self) -> SimResult<StepReport> {
        self.run_state.check()?;
        let wait = self.clock.delay_to_next(self.elapsed()).remaining();
        Ok(StepReport::new(self.last_step.as_ref(), wait.as_millis() as u64))
    }

    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    pub fn transitions(&self) -> &[ScenarioRow] {
        &self.transitions
    }

    /// Current step, for log context.
    pub fn current_step(&self) -> Step {
        self.clock.current_step
    }
}
