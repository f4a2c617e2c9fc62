use std::collections::HashMap;

use serde::Serialize;
use weft_model::{PluginName, RenderMode};

/// Where a plugin's setup stands for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SetupPhase {
    #[default]
    NotStarted,
    /// The setup is running and the exchange is resolvable.
    InSetupScope,
    SetupComplete,
}

/// Setup phases of every plugin that touched a request, kept in the exchange's extensions.
#[derive(Debug, Clone, Default)]
pub struct SetupTracker {
    phases: HashMap<PluginName, SetupPhase>,
}

impl SetupTracker {
    pub fn phase(&self, name: &str) -> SetupPhase {
        self.phases.get(name).copied().unwrap_or_default()
    }

    /// Move `name` into its setup scope, `false` if it already left [`SetupPhase::NotStarted`].
    pub(crate) fn enter(&mut self, name: &PluginName) -> bool {
        let phase = self.phases.entry(name.clone()).or_default();
        if *phase != SetupPhase::NotStarted {
            return false;
        }
        *phase = SetupPhase::InSetupScope;
        true
    }

    pub(crate) fn complete(&mut self, name: &PluginName) {
        self.phases.insert(name.clone(), SetupPhase::SetupComplete);
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub mode: RenderMode,
    /// Plugins whose setup ran, in order.
    pub invoked: Vec<PluginName>,
    /// Plugins excluded by their env in this mode.
    pub skipped: Vec<PluginName>,
}

impl SetupReport {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            invoked: Vec::new(),
            skipped: Vec::new(),
        }
    }
    pub fn was_invoked(&self, name: &str) -> bool {
        self.invoked.iter().any(|plugin| plugin.as_str() == name)
    }
}
