//! Scenario files on disk.
//!
//! Scenarios are addressed by name; the file is `<dir>/<name>.txt`.  Names
//! come from outside requests, so anything that could escape the directory
//! is rejected before touching the filesystem.

use std::path::{Path, PathBuf};

use crate::{Scenario, ScenarioError, ScenarioResult, parse_scenario};

#[derive(Clone, Debug)]
pub struct ScenarioLibrary {
    dir: PathBuf,
}

impl ScenarioLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing scenario `name`.
    pub fn path_for(&self, name: &str) -> ScenarioResult<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !valid {
            return Err(ScenarioError::InvalidName(name.to_owned()));
        }
        Ok(self.dir.join(format!("{name}.txt")))
    }

    /// Read and parse scenario `name`.
    pub fn load(&self, name: &str) -> ScenarioResult<Scenario> {
        let path = self.path_for(name)?;
        let text = std::fs::read_to_string(&path)
            .map_err(|source| ScenarioError::Read { path: path.clone(), source })?;
        parse_scenario(&text)
    }
}
