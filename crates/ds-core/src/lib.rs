//! `ds-core` — foundational types for the door simulator.
//!
//! This crate is a dependency of every other `ds-*` crate.  It has no `ds-*`
//! dependencies and only `serde` and `thiserror` from outside.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`angle`]  | `close_to`, `normalize`, degree conversion                |
//! | [`ids`]    | `DoorId`                                                  |
//! | [`time`]   | `Step`, `StepClock`, `Delay`                              |
//! | [`config`] | `SimConfig`, `DoorSpec`, `DoorKind`                       |
//! | [`error`]  | `DsError`, `DsResult`                                     |

pub mod angle;
pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angle::close_to;
pub use config::{DoorKind, DoorSpec, SimConfig};
pub use error::{DsError, DsResult};
pub use ids::DoorId;
pub use time::{Delay, Step, StepClock};
