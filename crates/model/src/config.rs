use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{PluginName, RenderConfig};

/// Host configuration, usually read from `config.toml` or `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub render: RenderConfig,
    pub plugins: PluginsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Bundled plugins the host must not register.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub disabled: BTreeSet<PluginName>,
}

impl PluginsConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }
}
