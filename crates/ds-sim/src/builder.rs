//! Fluent builder for constructing a running simulation.

use ds_core::SimConfig;
use ds_door::Door;
use ds_scenario::{Scenario, ScenarioLibrary, ScenarioPlayer};

use crate::handle::SimHandle;
use crate::state::{DoorSlot, SimState};
use crate::{SimError, SimResult};

/// Fluent builder for a [`SimHandle`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                   |
/// |-------------------------|-------------------------------------------|
/// | `.library(l)`           | `ScenarioLibrary::new(config.scenario_dir)` |
/// | `.scenario(door, n, s)` | every door starts on the idle scenario    |
///
/// # Example
///
/// ```rust,ignore
/// let handle = SimBuilder::new(config)
///     .scenario("revolver", "warmup", warmup)
///     .build()?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    library:   Option<ScenarioLibrary>,
    scenarios: Vec<(String, String, Scenario)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, library: None, scenarios: Vec::new() }
    }

    /// Where scenario-start requests look up scenarios by name.
    pub fn library(mut self, library: ScenarioLibrary) -> Self {
        self.library = Some(library);
        self
    }

    /// Queue `scenario` on `door` so it starts with the first step.
    pub fn scenario(
        mut self,
        door:     impl Into<String>,
        name:     impl Into<String>,
        scenario: Scenario,
    ) -> Self {
        self.scenarios.push((door.into(), name.into(), scenario));
        self
    }

    /// Validate the configuration, build every door, and return a handle to
    /// the new simulation.  The scheduler is not started.
    pub fn build(self) -> SimResult<SimHandle> {
        self.config.validate()?;

        let doors = self
            .config
            .doors
            .iter()
            .map(|spec| {
                let door = Door::from_kind(&spec.kind).map_err(|source| SimError::Door {
                    name: spec.name.clone(),
                    source,
                })?;
                Ok(DoorSlot { name: spec.name.clone(), door, player: ScenarioPlayer::idle() })
            })
            .collect::<SimResult<Vec<_>>>()?;

        let library = self
            .library
            .unwrap_or_else(|| ScenarioLibrary::new(self.config.scenario_dir.clone()));

        let mut state = SimState::new(self.config, doors);
        for (door, name, scenario) in self.scenarios {
            let id = state.door_id(&door)?;
            state.queue_scenario(id, &name, scenario)?;
        }

        Ok(SimHandle::new(state, library))
    }
}
