//! `SimHandle` — the request-handler side of the simulation.
//!
//! # Blocking lock usage
//!
//! `SimState` sits behind a `parking_lot::Mutex`:
//! 1. every critical section is an in-memory state transition
//! 2. the lock is never held across `.await`
//! 3. file reads (scenario loading) happen before the lock is taken

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::info;

use ds_scenario::ScenarioLibrary;

use crate::record::{ResultRow, ScenarioRow, StepReport};
use crate::state::{RunState, SimState};
use crate::SimResult;

#[derive(Debug)]
struct Shared {
    state:    Mutex<SimState>,
    library:  ScenarioLibrary,
    shutdown: watch::Sender<bool>,
}

/// Cheap-to-clone handle onto one simulation.
///
/// Every method takes the shared lock for the duration of an in-memory
/// update only.  Once the run has halted or stopped every request is
/// rejected.
#[derive(Clone, Debug)]
pub struct SimHandle {
    shared: Arc<Shared>,
}

impl SimHandle {
    pub(crate) fn new(state: SimState, library: ScenarioLibrary) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared { state: Mutex::new(state), library, shutdown }),
        }
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Someone arrived at `door`.
    pub fn arrive(&self, door: &str) -> SimResult<()> {
        let mut state = self.shared.state.lock();
        state.run_state().check()?;
        let id = state.door_id(door)?;
        state.arrive(id)
    }

    /// Load scenario `scenario` from the library and queue it on `door`.
    ///
    /// Parse and lookup failures are returned to the caller; the running
    /// scenario is left untouched.
    pub fn start_scenario(&self, door: &str, scenario: &str) -> SimResult<()> {
        let id = {
            let state = self.shared.state.lock();
            state.run_state().check()?;
            state.door_id(door)?
        };
        let parsed = self.shared.library.load(scenario)?;

        let mut state = self.shared.state.lock();
        state.queue_scenario(id, scenario, parsed)?;
        info!(door, scenario, "scenario queued");
        Ok(())
    }

    /// The latest step and the milliseconds until the next one.
    pub fn step_report(&self) -> SimResult<StepReport> {
        self.shared.state.lock().step_report()
    }

    /// Copy of the in-memory result log.
    pub fn results(&self) -> SimResult<Vec<ResultRow>> {
        let state = self.shared.state.lock();
        state.run_state().check()?;
        Ok(state.results().to_vec())
    }

    /// Copy of the in-memory scenario transition log.
    pub fn scenario_transitions(&self) -> SimResult<Vec<ScenarioRow>> {
        let state = self.shared.state.lock();
        state.run_state().check()?;
        Ok(state.transitions().to_vec())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub fn run_state(&self) -> RunState {
        self.shared.state.lock().run_state().clone()
    }

    pub fn is_running(&self) -> bool {
        *self.shared.state.lock().run_state() == RunState::Running
    }

    /// Ask the scheduler to stop after the step in progress.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.state.lock();
            if *state.run_state() != RunState::Running {
                return;
            }
            state.set_run_state(RunState::Stopping);
        }
        self.shared.shutdown.send_replace(true);
    }

    pub(crate) fn halt(&self, reason: String) {
        self.shared.state.lock().set_run_state(RunState::Halted(reason));
        self.shared.shutdown.send_replace(true);
    }

    pub(crate) fn mark_stopped(&self) {
        let mut state = self.shared.state.lock();
        if *state.run_state() == RunState::Stopping {
            state.set_run_state(RunState::Stopped);
        }
    }

    pub(crate) fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shared.shutdown.subscribe()
    }

    // ── State access ──────────────────────────────────────────────────────

    /// Run `f` with the state locked.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SimState) -> R) -> R {
        f(&mut self.shared.state.lock())
    }

    pub fn elapsed(&self) -> Duration {
        self.shared.state.lock().elapsed()
    }

    pub fn run_start(&self) -> Instant {
        self.shared.state.lock().run_start()
    }
}
