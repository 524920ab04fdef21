//! `ds-scenario` — simulated foot traffic.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`parser`] | `Scenario`, `parse_scenario`                              |
//! | [`player`] | `ScenarioPlayer`, `PendingScenario`, `ScenarioSwitch`     |
//! | [`loader`] | `ScenarioLibrary` — `<dir>/<name>.txt` lookup             |
//! | [`error`]  | `ScenarioError`, `ScenarioResult<T>`                      |
//!
//! # Cycle model (summary)
//!
//! A scenario is a list of arrivals per step, replayed forever.  At step `t`
//! for a scenario started at step `s`:
//!
//! ```text
//! index = (t - s) % arrivals.len()
//! ```
//!
//! A replacement scenario waits in the player until `index` comes round to
//! 0, so a cycle is never cut short.

pub mod error;
pub mod loader;
pub mod parser;
pub mod player;

#[cfg(test)]
mod tests;

pub use error::{ScenarioError, ScenarioResult};
pub use loader::ScenarioLibrary;
pub use parser::{Scenario, parse_scenario};
pub use player::{PendingScenario, ScenarioPlayer, ScenarioSwitch};
