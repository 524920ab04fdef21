//! Single-leaf swinging door.
//!
//! The leaf opens in coarse strides of [`OPEN_STRIDE`] positions while
//! anyone is waiting and closes one position per step otherwise.  A person
//! passes through on the step the leaf reaches `open_to`; the occupancy flag
//! is raised for that one step only.

use std::f64::consts::FRAC_PI_2;

use crate::model::{DoorModel, DoorSnapshot, Motion};
use crate::{DoorError, DoorResult};

/// Positions the leaf opens per step.
pub const OPEN_STRIDE: u32 = 4;

#[derive(Clone, Debug)]
pub struct SwingingDoor {
    granularity: u32,
    open_to: u32,
    /// Current opening, `0..=open_to`.
    pub position: u32,
    pub arriving: u32,
    pub occupied: [bool; 1],
}

impl SwingingDoor {
    /// `granularity` is the number of closing steps in a quarter circle;
    /// `open_to` is how far the leaf must open, in those steps, to let a
    /// person through.
    pub fn new(granularity: u32, open_to: u32) -> DoorResult<Self> {
        if granularity == 0 {
            return Err(DoorError::ZeroGranularity);
        }
        if open_to == 0 {
            return Err(DoorError::ZeroOpening);
        }
        Ok(Self {
            granularity,
            open_to,
            position: 0,
            arriving: 0,
            occupied: [false],
        })
    }

    #[inline]
    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    #[inline]
    pub fn open_to(&self) -> u32 {
        self.open_to
    }

    /// Leaf opening in radians.
    pub fn openness(&self) -> f64 {
        FRAC_PI_2 / self.granularity as f64 * self.position as f64
    }

    /// Move the leaf one step and return the signed movement.
    pub fn swing(&mut self) -> i32 {
        self.occupied[0] = false;
        let movement = if self.arriving > 0 {
            ((self.position + OPEN_STRIDE).min(self.open_to) - self.position) as i32
        } else if self.position > 0 {
            -1
        } else {
            0
        };
        self.position = self.position.saturating_add_signed(movement);
        if self.position == self.open_to && self.arriving > 0 {
            self.arriving -= 1;
            self.occupied[0] = true;
        }
        movement
    }
}

impl DoorModel for SwingingDoor {
    fn step(&mut self) -> i32 {
        self.swing()
    }

    fn angle(&self) -> f64 {
        self.openness()
    }

    fn motion(&self, _moved: i32) -> Motion {
        Motion::Swing { angle: self.openness() }
    }

    fn snapshot(&self) -> DoorSnapshot {
        DoorSnapshot {
            arriving: self.arriving,
            occupied: self.occupied.to_vec(),
            position: self.position as u64,
        }
    }

    fn arriving(&self) -> u32 {
        self.arriving
    }

    fn add_arrivals(&mut self, n: u32) {
        self.arriving = self.arriving.saturating_add(n);
    }
}
