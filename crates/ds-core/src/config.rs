//! Top-level simulation configuration.
//!
//! Loaded from JSON by the application crate (every field has a default) and
//! validated before anything is built from it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{DsError, DsResult, StepClock};

// ── Door specs ────────────────────────────────────────────────────────────────

/// Construction parameters for one door variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DoorKind {
    /// Four-cell revolving door.  `granularity` positions per full turn
    /// (positive multiple of 8); `tolerance` is the entry half-window in
    /// steps.
    Revolving { granularity: u32, tolerance: u32 },

    /// Single-leaf swinging door.  `granularity` closing steps per quarter
    /// circle; `open_to` is how far it opens, in those steps, to admit a
    /// person.
    Swinging { granularity: u32, open_to: u32 },
}

/// A named door in the simulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: DoorKind,
}

impl DoorSpec {
    pub fn revolving(name: impl Into<String>, granularity: u32, tolerance: u32) -> Self {
        Self { name: name.into(), kind: DoorKind::Revolving { granularity, tolerance } }
    }

    pub fn swinging(name: impl Into<String>, granularity: u32, open_to: u32) -> Self {
        Self { name: name.into(), kind: DoorKind::Swinging { granularity, open_to } }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Wall time per step.  625 ms turns a 16-granularity revolving door at
    /// 6 rpm.
    pub step_duration_ms: u64,

    /// How long the scheduler waits for the actuator's status report before
    /// each step.  Must be shorter than `step_duration_ms`.
    pub report_timeout_ms: u64,

    /// How long the actuator has to announce itself after the link opens.
    pub ready_timeout_ms: u64,

    /// Directory holding `<name>.txt` scenario files.
    pub scenario_dir: PathBuf,

    /// Directory the result and scenario logs are appended to.
    pub recording_dir: PathBuf,

    /// Doors in reporting and hardware-command order.
    pub doors: Vec<DoorSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_duration_ms:  625,
            report_timeout_ms: 200,
            ready_timeout_ms:  8_000,
            scenario_dir:      PathBuf::from("scenarios"),
            recording_dir:     PathBuf::from("recordings"),
            doors: vec![
                DoorSpec::revolving("revolver", 16, 3),
                DoorSpec::swinging("swinger", 8, 7),
            ],
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    #[inline]
    pub fn report_timeout(&self) -> Duration {
        Duration::from_millis(self.report_timeout_ms)
    }

    #[inline]
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    /// Construct a `StepClock` pre-configured for this run.
    pub fn make_clock(&self) -> StepClock {
        StepClock::new(self.step_duration())
    }

    /// Check the invariants that cannot be expressed in the types.
    ///
    /// Door parameters are checked when the doors are built.
    pub fn validate(&self) -> DsResult<()> {
        if self.step_duration_ms == 0 {
            return Err(DsError::Config("step_duration_ms must be positive".into()));
        }
        if self.report_timeout_ms >= self.step_duration_ms {
            return Err(DsError::Config(format!(
                "report_timeout_ms ({}) must be shorter than step_duration_ms ({})",
                self.report_timeout_ms, self.step_duration_ms
            )));
        }
        if self.doors.is_empty() {
            return Err(DsError::Config("at least one door is required".into()));
        }
        let mut seen = HashSet::new();
        for door in &self.doors {
            if door.name.is_empty() {
                return Err(DsError::Config("door names must not be empty".into()));
            }
            if !seen.insert(door.name.as_str()) {
                return Err(DsError::Config(format!("duplicate door name {:?}", door.name)));
            }
        }
        Ok(())
    }
}
