use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario parse error on line {line}: {text:?} is not a non-negative integer")]
    Parse { line: usize, text: String },

    #[error("scenario has no arrival lines")]
    Empty,

    #[error("invalid scenario name {0:?}")]
    InvalidName(String),

    #[error("cannot read scenario {path}: {source}")]
    Read {
        path:   PathBuf,
        source: std::io::Error,
    },
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
