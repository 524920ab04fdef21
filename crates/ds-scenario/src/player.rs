//! Cyclic arrival playback with deferred scenario replacement.

use ds_core::Step;
use tracing::debug;

use crate::{Scenario, ScenarioError, ScenarioResult};

/// A scenario waiting to replace the active one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingScenario {
    pub name:     String,
    pub arrivals: Vec<u32>,
}

/// Emitted when a pending scenario becomes active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioSwitch {
    pub name: String,
    /// First step played from the new scenario.
    pub step: Step,
}

/// Plays one door's arrivals.
///
/// The player starts on the idle scenario `[0]` (nobody arrives).
#[derive(Clone, Debug)]
pub struct ScenarioPlayer {
    /// Never empty.
    arrivals: Vec<u32>,
    name:     Option<String>,
    started:  Step,
    pending:  Option<PendingScenario>,
}

impl Default for ScenarioPlayer {
    fn default() -> Self {
        Self::idle()
    }
}

impl ScenarioPlayer {
    /// A player on the idle scenario, started at step 0.
    pub fn idle() -> Self {
        Self {
            arrivals: vec![0],
            name:     None,
            started:  Step::ZERO,
            pending:  None,
        }
    }

    /// A player already running `arrivals` from `started`.
    pub fn starting_at(
        name:     impl Into<String>,
        arrivals: Vec<u32>,
        started:  Step,
    ) -> ScenarioResult<Self> {
        if arrivals.is_empty() {
            return Err(ScenarioError::Empty);
        }
        Ok(Self { arrivals, name: Some(name.into()), started, pending: None })
    }

    /// Name of the active scenario, `None` while idle.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn arrivals(&self) -> &[u32] {
        &self.arrivals
    }

    pub fn started(&self) -> Step {
        self.started
    }

    pub fn pending(&self) -> Option<&PendingScenario> {
        self.pending.as_ref()
    }

    /// Position within the active cycle at `step`.
    #[inline]
    pub fn index_at(&self, step: Step) -> usize {
        let elapsed = step.0.saturating_sub(self.started.0);
        (elapsed % self.arrivals.len() as u64) as usize
    }

    /// Queue `scenario` to take over at the next cycle boundary.
    ///
    /// A scenario queued earlier that has not started yet is replaced.
    pub fn queue(&mut self, name: impl Into<String>, scenario: Scenario) -> ScenarioResult<()> {
        if scenario.arrivals.is_empty() {
            return Err(ScenarioError::Empty);
        }
        let name = name.into();
        if let Some(previous) = &self.pending {
            debug!(replaced = %previous.name, by = %name, "pending scenario replaced");
        }
        self.pending = Some(PendingScenario { name, arrivals: scenario.arrivals });
        Ok(())
    }

    /// Arrivals for `step`, swapping in the pending scenario first if `step`
    /// falls on a cycle boundary.
    pub fn arrivals_at(&mut self, step: Step) -> (u32, Option<ScenarioSwitch>) {
        let mut switch = None;
        if self.pending.is_some() && self.index_at(step) == 0 {
            if let Some(next) = self.pending.take() {
                self.arrivals = next.arrivals;
                self.started = step;
                switch = Some(ScenarioSwitch { name: next.name.clone(), step });
                self.name = Some(next.name);
            }
        }
        let index = self.index_at(step);
        (self.arrivals[index], switch)
    }
}
