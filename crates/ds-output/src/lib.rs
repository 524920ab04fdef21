//! `ds-output` — recordings for the door simulator.
//!
//! | File                         | Row                                          |
//! |------------------------------|----------------------------------------------|
//! | `<stamp>.csv`                | elapsed secs, arrivals per door, telemetry…  |
//! | `<stamp>-scenarios.csv`      | elapsed secs, door, scenario                 |
//!
//! `<stamp>` is the run start in local time, `%m%d%H-%M%S`.  Neither file has
//! a header and rows may differ in width once telemetry is present.
//!
//! [`SimOutputObserver`] drives any [`OutputWriter`] from the scheduler.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::create(Path::new("recordings"))?;
//! let task = Scheduler::new(handle, SimOutputObserver::new(writer)).spawn();
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::{CsvWriter, recording_stamp};
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use writer::OutputWriter;
