//! Observer trait for persisting and reporting what the scheduler did.

use ds_core::Step;

use crate::record::{ResultRow, ScenarioRow, StepRecord, UnderrunRow};
use crate::SimError;

/// Callbacks invoked by the [`Scheduler`][crate::Scheduler] outside the
/// shared lock.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Hooks cannot fail the run; an
/// implementation that does I/O keeps its own error.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_step(&mut self, record: &StepRecord, _row: &ResultRow) {
///         if record.step.0 % 100 == 0 {
///             println!("{}", record.step);
///         }
///     }
/// }
/// ```
pub trait SimObserver: Send {
    /// Called after each step's command has gone out.
    fn on_step(&mut self, _record: &StepRecord, _result: &ResultRow) {}

    /// Called when a door switches to a newly queued scenario.
    fn on_scenario_switch(&mut self, _row: &ScenarioRow) {}

    /// Called when the next step is already overdue.
    fn on_underrun(&mut self, _row: &UnderrunRow) {}

    /// Called once if the run halts on an error.
    fn on_halt(&mut self, _error: &SimError) {}

    /// Called once when the scheduler loop exits, halted or not.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
