//! `ds-sim` — real-time step loop for the door simulator.
//!
//! # Step procedure
//!
//! ```text
//! loop:
//!   ① Report   — with an actuator attached, wait (bounded) for its status
//!                line.  Outside the lock.
//!   ② Snapshot — record each door's pre-step state.          ┐
//!   ③ Arrivals — swap in a pending scenario on a cycle        │ under the
//!                boundary, then add this step's arrivals.     │ shared lock
//!   ④ Step     — advance every door once.                     ┘
//!   ⑤ Command  — send motion + time-to-next-step to the actuator.
//!   ⑥ Log      — append the result row; hand records to the observer.
//!   ⑦ Wait     — sleep until run_start + step × step_duration, or go
//!                straight on when already late.
//! ```
//!
//! Request handlers share the same [`SimState`] through a [`SimHandle`].  The
//! lock is never held across an `.await`.
//!
//! Any step error is fatal: the run moves to [`RunState::Halted`] and every
//! later handle call is rejected.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let handle = SimBuilder::new(SimConfig::default()).build()?;
//! let task = Scheduler::new(handle.clone(), NoopObserver).spawn();
//! handle.arrive("revolver")?;
//! let report = handle.step_report()?;
//! ```

pub mod actuator;
pub mod builder;
pub mod error;
pub mod handle;
pub mod observer;
pub mod record;
pub mod scheduler;
pub mod state;


pub use actuator::{Actuator, Command, LineActuator, Telemetry, open_device, parse_report};
pub use builder::SimBuilder;
pub use error::{ActuatorError, ActuatorResult, SimError, SimResult};
pub use handle::SimHandle;
pub use observer::{NoopObserver, SimObserver};
pub use record::{DoorStepRecord, ResultRow, ScenarioRow, StepRecord, StepReport, UnderrunRow};
pub use scheduler::Scheduler;
pub use state::{DoorSlot, RunState, SimState, StepOutcome};
