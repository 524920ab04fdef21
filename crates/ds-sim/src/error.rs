use std::time::Duration;

use ds_core::DsError;
use ds_door::DoorError;
use ds_scenario::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] DsError),

    #[error("door {name:?}: {source}")]
    Door {
        name:   String,
        source: DoorError,
    },

    #[error("unknown door {0:?}")]
    UnknownDoor(String),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    #[error("simulation halted: {0}")]
    Halted(String),

    #[error("simulation stopped")]
    Stopped,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failures on the hardware link.  All of them halt the run.
#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("actuator not ready after {0:?}")]
    NotReady(Duration),

    #[error("no status report within {0:?}")]
    NoReport(Duration),

    #[error("malformed status report {0:?}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ActuatorResult<T> = Result<T, ActuatorError>;
