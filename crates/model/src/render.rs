use std::{fmt::Display, str::FromStr};

use hyper::Request;
use serde::{Deserialize, Serialize};

use crate::{constants::DEFAULT_ISLAND_PATH_PREFIX, BoxError};

/// How the host renders the response of one request.
///
/// The host may attach a `RenderMode` to a request as an extension; see [`RenderMode::detect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Standard,
    /// Partial hydration, only isolated components are rendered.
    Islands,
}

impl RenderMode {
    /// Resolve the render mode of a request.
    ///
    /// An explicit `RenderMode` extension wins, then the island path prefix, then the configured default.
    pub fn detect<B>(req: &Request<B>, config: &RenderConfig) -> Self {
        if let Some(mode) = req.extensions().get::<RenderMode>() {
            return *mode;
        }
        if config.is_island_path(req.uri().path()) {
            return RenderMode::Islands;
        }
        config.default_mode
    }
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Standard => f.write_str("standard"),
            RenderMode::Islands => f.write_str("islands"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = BoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(RenderMode::Standard),
            "islands" | "island" => Ok(RenderMode::Islands),
            _ => Err(format!("unknown render mode {s}").into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub default_mode: RenderMode,
    /// Requests under this path prefix are rendered in island mode, empty disables the match.
    pub island_path_prefix: String,
}

impl RenderConfig {
    /// Whether `path` falls under the island prefix, matched on whole path segments.
    pub fn is_island_path(&self, path: &str) -> bool {
        if self.island_path_prefix.is_empty() {
            return false;
        }
        let prefix = self.island_path_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_mode: RenderMode::Standard,
            island_path_prefix: DEFAULT_ISLAND_PATH_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_detect() {
        let config = RenderConfig::default();
        let req = Request::get("/index").body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Standard);

        let req = Request::get("/__island/Counter_abc.json").body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Islands);

        let req = Request::get("/__island/x").extension(RenderMode::Standard).body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Standard);

        // the prefix only matches whole segments
        let req = Request::get("/__islanders/about").body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Standard);
        let req = Request::get("/__island").body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Islands);

        let config = RenderConfig {
            default_mode: RenderMode::Islands,
            island_path_prefix: String::new(),
        };
        let req = Request::get("/__island/x").body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Islands);
        let req = Request::get("/").body(()).unwrap();
        assert_eq!(RenderMode::detect(&req, &config), RenderMode::Islands);
    }

    #[test]
    fn test_island_path_trailing_slash() {
        let config = RenderConfig {
            default_mode: RenderMode::Standard,
            island_path_prefix: "/islands/".to_string(),
        };
        assert!(config.is_island_path("/islands/Counter"));
        assert!(config.is_island_path("/islands"));
        assert!(!config.is_island_path("/islandsx/Counter"));
        assert!(!config.is_island_path("/"));

        let config = RenderConfig {
            default_mode: RenderMode::Standard,
            island_path_prefix: "/".to_string(),
        };
        assert!(config.is_island_path("/anything"));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Islands".parse::<RenderMode>().unwrap(), RenderMode::Islands);
        assert_eq!("standard".parse::<RenderMode>().unwrap(), RenderMode::Standard);
        assert!("spa".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::Islands.to_string(), "islands");
    }
}
