//! The real-time step loop.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use ds_core::Delay;

use crate::actuator::{Actuator, Command};
use crate::handle::SimHandle;
use crate::observer::SimObserver;
use crate::record::UnderrunRow;
use crate::{SimError, SimResult};

/// Drives a simulation in real time.
///
/// One task loops: wait for the actuator's report, apply a step under the
/// lock, send the command, hand the records to the observer, then sleep
/// until the next step is due.  A late step is followed immediately by the
/// next one so the run catches up instead of drifting.
pub struct Scheduler<O: SimObserver> {
    handle:         SimHandle,
    observer:       O,
    actuator:       Option<Box<dyn Actuator>>,
    report_timeout: Duration,
}

impl<O: SimObserver + 'static> Scheduler<O> {
    pub fn new(handle: SimHandle, observer: O) -> Self {
        let report_timeout = handle.with_state(|s| s.config.report_timeout());
        Self { handle, observer, actuator: None, report_timeout }
    }

    /// Keep `actuator` in step with the simulation.
    pub fn with_actuator(mut self, actuator: Box<dyn Actuator>) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Run on a new task, handing the observer back when the run ends.  A
    /// panic inside the loop halts the simulation.
    pub fn spawn(self) -> JoinHandle<SimResult<O>> {
        let handle = self.handle.clone();
        let task = tokio::spawn(self.run());
        tokio::spawn(async move {
            match task.await {
                Ok(result) => result,
                Err(e) => {
                    error!(error = %e, "scheduler task failed");
                    handle.halt(format!("scheduler task failed: {e}"));
                    Err(SimError::Internal(e.to_string()))
                }
            }
        })
    }

    /// Run until shutdown or the first error, returning the observer.
    pub async fn run(mut self) -> SimResult<O> {
        let mut shutdown = self.handle.subscribe_shutdown();
        self.handle.with_state(|s| s.restart_clock(tokio::time::Instant::now()));
        info!("scheduler started");

        while self.handle.is_running() {
            let delay = match self.step_once().await {
                Ok(delay) => delay,
                Err(SimError::Stopped) => break,
                Err(e) => return Err(self.fail(e)),
            };

            if let Delay::Late(late) = delay {
                let row = self.handle.with_state(|s| UnderrunRow {
                    elapsed_secs: s.elapsed().as_secs_f64(),
                    step:         s.current_step(),
                    late_secs:    late.as_secs_f64(),
                });
                warn!(step = %row.step, late_ms = late.as_millis() as u64, "behind real time, stepping immediately");
                self.observer.on_underrun(&row);
                tokio::task::yield_now().await;
                continue;
            }

            let deadline = self.handle.with_state(|s| s.next_deadline());
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        self.handle.mark_stopped();
        let final_step = self.handle.with_state(|s| s.current_step());
        info!(%final_step, "scheduler stopped");
        self.observer.on_sim_end(final_step);
        Ok(self.observer)
    }

    async fn step_once(&mut self) -> SimResult<Delay> {
        let telemetry = match self.actuator.as_mut() {
            Some(actuator) => actuator.read_report(self.report_timeout).await?,
            None => Vec::new(),
        };

        let outcome = self.handle.with_state(|s| {
            let elapsed = s.elapsed();
            s.advance(elapsed, telemetry)
        })?;

        if let Some(actuator) = self.actuator.as_mut() {
            let command = Command::for_step(&outcome.record, outcome.delay.remaining());
            actuator.send_command(&command).await?;
        }

        self.handle.with_state(|s| s.push_result(outcome.result.clone()));
        for row in &outcome.transitions {
            self.observer.on_scenario_switch(row);
        }
        self.observer.on_step(&outcome.record, &outcome.result);
        Ok(outcome.delay)
    }

    fn fail(&mut self, e: SimError) -> SimError {
        let step = self.handle.with_state(|s| s.current_step());
        error!(%step, error = %e, "step failed, halting");
        self.handle.halt(e.to_string());
        self.observer.on_halt(&e);
        let final_step = self.handle.with_state(|s| s.current_step());
        self.observer.on_sim_end(final_step);
        e
    }
}
