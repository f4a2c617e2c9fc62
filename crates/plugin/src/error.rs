use std::fmt::Display;

use weft_kernel::BoxError;
use weft_model::PluginName;

#[derive(Debug)]
pub enum PluginError {
    /// The plugin was defined without a name.
    MissingName,
    /// Another plugin with the same name is already registered.
    DuplicateName(PluginName),
    Create { plugin: &'static str, source: BoxError },
    /// The plugin's setup failed while handling a request.
    Setup { plugin: PluginName, source: BoxError },
}

impl PluginError {
    pub fn is_registration_error(&self) -> bool {
        matches!(self, PluginError::MissingName | PluginError::DuplicateName(_))
    }
}

impl Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginError::MissingName => write!(f, "[Wf.Plugin] missing plugin name"),
            PluginError::DuplicateName(name) => write!(f, "[Wf.Plugin] duplicate plugin name {name}"),
            PluginError::Create { plugin, source } => write!(f, "[Wf.Plugin.{plugin}] create error: {source}"),
            PluginError::Setup { plugin, source } => write!(f, "[Wf.Plugin.{plugin}] {source}"),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Create { source, .. } | PluginError::Setup { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
