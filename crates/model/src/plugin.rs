use std::{
    borrow::{Borrow, Cow},
    fmt::Display,
    ops::Deref,
    str::FromStr,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{BoxError, RenderMode};

/// Name of a registered plugin.
///
/// A name is never empty and never made of whitespace only. Uniqueness is
/// enforced by the registry that stores the plugin, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginName(Arc<str>);

impl PluginName {
    /// # Errors
    /// If the name is empty or blank.
    pub fn new(name: impl Into<Arc<str>>) -> Result<Self, BoxError> {
        let name: Arc<str> = name.into();
        if name.trim().is_empty() {
            return Err("empty plugin name".into());
        }
        Ok(Self(name))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PluginName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for PluginName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for PluginName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PluginName {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PluginName {
    type Error = BoxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PluginName> for String {
    fn from(value: PluginName) -> Self {
        value.0.to_string()
    }
}

/// Rendering environments a plugin takes part in.
///
/// `islands: None` behaves like `Some(true)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginEnv {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub islands: Option<bool>,
}

impl PluginEnv {
    pub const fn islands(islands: bool) -> Self {
        Self { islands: Some(islands) }
    }
    /// Plugins explicitly opted out of islands are excluded from island-mode requests.
    pub fn allows(&self, mode: RenderMode) -> bool {
        match mode {
            RenderMode::Islands => self.islands.unwrap_or(true),
            RenderMode::Standard => true,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PluginMetaData {
    pub authors: Option<Cow<'static, str>>,
    pub description: Option<Cow<'static, str>>,
    pub version: Option<Cow<'static, str>>,
    pub homepage: Option<Cow<'static, str>>,
    pub repository: Option<Cow<'static, str>>,
}

#[macro_export]
macro_rules! plugin_meta {
    () => {
        {
            $crate::PluginMetaData {
                authors: Some(env!("CARGO_PKG_AUTHORS").into()),
                version: Some(env!("CARGO_PKG_VERSION").into()),
                description: Some(env!("CARGO_PKG_DESCRIPTION").into()),
                homepage: Some(env!("CARGO_PKG_HOMEPAGE").into()),
                repository: Some(env!("CARGO_PKG_REPOSITORY").into()),
            }
        }
    };
    ($($key:ident: $value:expr),*) => {
        {
            let mut meta = $crate::plugin_meta!();
            $(
                meta.$key = Some($value.into());
            )*
            meta
        }
    };

}

/// The inert, serializable part of a registered plugin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PluginAttributes {
    pub name: PluginName,
    #[serde(default)]
    pub env: PluginEnv,
    #[serde(default)]
    pub meta: PluginMetaData,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_name() {
        assert_eq!("server-only-plugin".parse::<PluginName>().unwrap().as_str(), "server-only-plugin");
        assert!("".parse::<PluginName>().is_err());
        assert!("   ".parse::<PluginName>().is_err());
        assert!(serde_json::from_value::<PluginName>(json!("")).is_err());
    }

    #[test]
    fn test_env_allows() {
        let opted_out = PluginEnv::islands(false);
        assert!(!opted_out.allows(RenderMode::Islands));
        assert!(opted_out.allows(RenderMode::Standard));

        let absent = PluginEnv::default();
        assert!(absent.allows(RenderMode::Islands));
        assert!(absent.allows(RenderMode::Standard));

        assert!(PluginEnv::islands(true).allows(RenderMode::Islands));
    }

    #[test]
    fn test_dec_attributes() {
        let attr: PluginAttributes = serde_json::from_value(json!({
            "name": "server-only-plugin",
            "env": { "islands": false }
        }))
        .unwrap();
        assert_eq!(attr.name.as_str(), "server-only-plugin");
        assert_eq!(attr.env, PluginEnv::islands(false));
        assert_eq!(attr.meta, PluginMetaData::default());

        let attr: PluginAttributes = serde_json::from_value(json!({ "name": "plain" })).unwrap();
        assert_eq!(attr.env.islands, None);

        assert!(serde_json::from_value::<PluginAttributes>(json!({ "name": "" })).is_err());
    }

    #[test]
    fn test_env_toml() {
        let env: PluginEnv = toml::from_str("islands = false").unwrap();
        assert_eq!(env, PluginEnv::islands(false));
        let env: PluginEnv = toml::from_str("").unwrap();
        assert_eq!(env, PluginEnv::default());
    }
}
