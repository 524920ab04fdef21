//! The `OutputWriter` trait implemented by recording backends.

use ds_sim::{ResultRow, ScenarioRow, UnderrunRow};

use crate::OutputResult;

/// A sink for the two simulation logs.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for later inspection.
pub trait OutputWriter: Send {
    /// Append one step's result row.
    fn write_result(&mut self, row: &ResultRow) -> OutputResult<()>;

    /// Append one scenario transition.
    fn write_scenario(&mut self, row: &ScenarioRow) -> OutputResult<()>;

    /// Append one timing underrun.
    fn write_underrun(&mut self, row: &UnderrunRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
