use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DoorError {
    #[error("revolving door granularity must be a positive multiple of 8, got {0}")]
    Granularity(u32),

    #[error("swinging door granularity must be positive")]
    ZeroGranularity,

    #[error("swinging door must open at least one step")]
    ZeroOpening,
}

pub type DoorResult<T> = Result<T, DoorError>;
