//! `Door` — the variant stored by the simulation.

use ds_core::DoorKind;

use crate::model::{DoorModel, DoorSnapshot, Motion};
use crate::{DoorResult, RevolvingDoor, SwingingDoor};

#[derive(Clone, Debug)]
pub enum Door {
    Revolving(RevolvingDoor),
    Swinging(SwingingDoor),
}

impl Door {
    /// Build a door from its configured parameters.
    pub fn from_kind(kind: &DoorKind) -> DoorResult<Self> {
        Ok(match *kind {
            DoorKind::Revolving { granularity, tolerance } => {
                Door::Revolving(RevolvingDoor::new(granularity, tolerance)?)
            }
            DoorKind::Swinging { granularity, open_to } => {
                Door::Swinging(SwingingDoor::new(granularity, open_to)?)
            }
        })
    }

    fn inner(&self) -> &dyn DoorModel {
        match self {
            Door::Revolving(d) => d,
            Door::Swinging(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn DoorModel {
        match self {
            Door::Revolving(d) => d,
            Door::Swinging(d) => d,
        }
    }
}

impl DoorModel for Door {
    fn step(&mut self) -> i32 {
        self.inner_mut().step()
    }

    fn angle(&self) -> f64 {
        self.inner().angle()
    }

    fn motion(&self, moved: i32) -> Motion {
        self.inner().motion(moved)
    }

    fn snapshot(&self) -> DoorSnapshot {
        self.inner().snapshot()
    }

    fn arriving(&self) -> u32 {
        self.inner().arriving()
    }

    fn add_arrivals(&mut self, n: u32) {
        self.inner_mut().add_arrivals(n)
    }
}
