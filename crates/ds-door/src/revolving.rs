//! Four-cell revolving door.
//!
//! # Geometry
//!
//! The door turns through `granularity` discrete positions per revolution.
//! Cell `q` is bisected by the angle
//!
//! ```text
//! 2π / granularity × ((position + q × granularity / 4) mod granularity)
//! ```
//!
//! so cell 0 starts at the entry point (angle 0) and the exit point is the
//! diametrically opposite angle π.  People enter only near 0 and leave only
//! at π.
//!
//! Both tests are done on whole positions rather than angles.  A cell `d`
//! positions away from the entry is `2d` half-positions off, and is open
//! for entry when `2d < tolerance` (strict) or when it is exactly at the
//! entry.  The exit admits only the cell exactly at π.

use std::f64::consts::TAU;

use crate::model::{DoorModel, DoorSnapshot, Motion};
use crate::{DoorError, DoorResult};

const CELLS: usize = 4;

#[derive(Clone, Debug)]
pub struct RevolvingDoor {
    granularity: u32,
    /// Entry half-window in half-positions.
    tolerance: u32,
    /// Positions rotated since construction.  Never decreases.
    pub position: u64,
    pub arriving: u32,
    pub occupied: [bool; CELLS],
}

impl RevolvingDoor {
    /// A door taking `granularity` positions to turn a full circle.
    ///
    /// `tolerance` is the entry half-window in units of `π / granularity`,
    /// i.e. half a position.
    pub fn new(granularity: u32, tolerance: u32) -> DoorResult<Self> {
        if granularity == 0 || granularity % 8 != 0 {
            return Err(DoorError::Granularity(granularity));
        }
        Ok(Self {
            granularity,
            tolerance,
            position: 0,
            arriving: 0,
            occupied: [false; CELLS],
        })
    }

    #[inline]
    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    /// Entry half-window in half-positions.
    #[inline]
    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    /// Positions cell `quadrant` has turned past the entry, `0..granularity`.
    pub fn cell_offset(&self, quadrant: usize) -> u64 {
        let g = self.granularity as u64;
        (self.position + quadrant as u64 * g / 4) % g
    }

    /// The angle bisecting cell `quadrant` at the current position.
    pub fn quadrant_angle(&self, quadrant: usize) -> f64 {
        TAU / self.granularity as f64 * self.cell_offset(quadrant) as f64
    }

    /// Whether cell `quadrant` is inside the entry window.
    pub fn at_entry(&self, quadrant: usize) -> bool {
        let g = self.granularity as u64;
        let offset = self.cell_offset(quadrant);
        let distance = offset.min(g - offset);
        distance == 0 || 2 * distance < self.tolerance as u64
    }

    /// Whether cell `quadrant` is at the exit.
    pub fn at_exit(&self, quadrant: usize) -> bool {
        self.cell_offset(quadrant) == self.granularity as u64 / 2
    }

    /// Rotate one position if anyone is inside, returning positions rotated
    /// (0 or 1).
    ///
    /// Cells are visited in order.  An occupant at the exit leaves without
    /// the door moving for them; an occupant anywhere else keeps the door
    /// turning.  An empty cell at the entry takes one waiting person, which
    /// by itself does not turn the door on this step.
    pub fn rotate(&mut self) -> u32 {
        let mut steps = 0;
        for q in 0..CELLS {
            if self.occupied[q] {
                if self.at_exit(q) {
                    self.occupied[q] = false;
                } else {
                    steps = 1;
                }
            } else if self.arriving > 0 && self.at_entry(q) {
                self.occupied[q] = true;
                self.arriving -= 1;
            }
        }
        self.position += steps as u64;
        steps
    }
}

impl DoorModel for RevolvingDoor {
    fn step(&mut self) -> i32 {
        self.rotate() as i32
    }

    fn angle(&self) -> f64 {
        self.quadrant_angle(0)
    }

    fn motion(&self, moved: i32) -> Motion {
        Motion::Rotate { rotate: moved.max(0) as u32 }
    }

    fn snapshot(&self) -> DoorSnapshot {
        DoorSnapshot {
            arriving: self.arriving,
            occupied: self.occupied.to_vec(),
            position: self.position,
        }
    }

    fn arriving(&self) -> u32 {
        self.arriving
    }

    fn add_arrivals(&mut self, n: u32) {
        self.arriving = self.arriving.saturating_add(n);
    }
}
