//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use ds_core::Step;
use ds_sim::{ResultRow, ScenarioRow, SimError, SimObserver, StepRecord, UnderrunRow};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records every step and scenario switch through an
/// [`OutputWriter`].
///
/// A failed write does not stop the simulation.  The first error is kept and
/// can be collected with [`take_error`][Self::take_error] once the scheduler
/// has returned the observer.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "recording failed, later write errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step(&mut self, _record: &StepRecord, result: &ResultRow) {
        let result = self.writer.write_result(result);
        self.store_err(result);
    }

    fn on_scenario_switch(&mut self, row: &ScenarioRow) {
        let result = self.writer.write_scenario(row);
        self.store_err(result);
    }

    fn on_underrun(&mut self, row: &UnderrunRow) {
        let result = self.writer.write_underrun(row);
        self.store_err(result);
    }

    fn on_halt(&mut self, _error: &SimError) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
