//! Per-step records: what the monitor polls and what the logs persist.

use std::collections::BTreeMap;

use serde::Serialize;

use ds_core::Step;
use ds_door::{DoorSnapshot, Motion};

/// One door's part of a step.
///
/// Serialises flat: `{"arrived", "arriving", "occupied", "position",
/// "rotate" | "angle"}`.  The state fields are from *before* the step so a
/// monitor can replay the step itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoorStepRecord {
    #[serde(skip)]
    pub door:    String,
    /// People added by the scenario this step.
    pub arrived: u32,
    #[serde(flatten)]
    pub before:  DoorSnapshot,
    #[serde(flatten)]
    pub motion:  Motion,
}

/// Everything that happened in one step, doors in configured order.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub step:  Step,
    pub doors: Vec<DoorStepRecord>,
}

/// Reply to a monitor poll.
///
/// ```json
/// {"step": 12, "revolver": {...}, "swinger": {...}, "duration": 410}
/// ```
///
/// `duration` is how many milliseconds the client should wait before asking
/// again.  `step` is `null` until the first step has run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepReport {
    pub step:     Option<Step>,
    #[serde(flatten)]
    pub doors:    BTreeMap<String, DoorStepRecord>,
    pub duration: u64,
}

impl StepReport {
    pub fn new(record: Option<&StepRecord>, duration: u64) -> Self {
        let doors = record
            .map(|r| r.doors.iter().map(|d| (d.door.clone(), d.clone())).collect())
            .unwrap_or_default();
        Self { step: record.map(|r| r.step), doors, duration }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Result log row.
///
/// Field order: elapsed seconds, arrivals per door (configured order), then
/// actuator telemetry when an actuator is attached.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub elapsed_secs: f64,
    pub arrivals:     Vec<u32>,
    pub telemetry:    Vec<i64>,
}

/// Scenario transition log row: elapsed seconds, door, scenario name.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioRow {
    pub elapsed_secs: f64,
    pub door:         String,
    pub scenario:     String,
}

/// A step that came due before the previous one had finished.
#[derive(Clone, Debug, PartialEq)]
pub struct UnderrunRow {
    pub elapsed_secs: f64,
    /// The late step, applied immediately.
    pub step:         Step,
    pub late_secs:    f64,
}
