//! The `DoorModel` trait shared by both door variants.

use serde::Serialize;

use ds_core::angle::to_whole_degrees;

/// Door state as seen just before a step is applied.
///
/// `occupied` has one entry per cell: four for a revolving door, one for a
/// swinging door.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoorSnapshot {
    pub arriving: u32,
    pub occupied: Vec<bool>,
    pub position: u64,
}

/// What a door did in one step, in the shape the monitor expects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Motion {
    /// Revolving door: positions rotated (0 or 1).
    Rotate { rotate: u32 },
    /// Swinging door: leaf opening angle in radians after the step.
    Swing { angle: f64 },
}

impl Motion {
    /// The integer the actuator receives for this motion.
    pub fn command_value(self) -> i64 {
        match self {
            Motion::Rotate { rotate } => rotate as i64,
            Motion::Swing { angle } => to_whole_degrees(angle),
        }
    }
}

/// A door that can be advanced one discrete step at a time.
///
/// # Required methods
///
/// Implementors own their occupancy shape; the trait only exposes what the
/// scheduler and reporting need.
pub trait DoorModel: Send + 'static {
    /// Advance by one step and return the signed number of positions moved.
    fn step(&mut self) -> i32;

    /// Current angle in radians: rotation of the first cell for a revolving
    /// door, leaf openness for a swinging door.
    fn angle(&self) -> f64;

    /// Describe a step that moved `moved` positions.
    fn motion(&self, moved: i32) -> Motion;

    /// Copy of the mutable state.
    fn snapshot(&self) -> DoorSnapshot;

    /// People currently waiting.
    fn arriving(&self) -> u32;

    /// Register `n` more people waiting to use the door.
    fn add_arrivals(&mut self, n: u32);
}
