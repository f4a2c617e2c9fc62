use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use weft_model::{constants::CONFIG_FILE_STEM, BoxError, HostConfig};

use super::{config_format::ConfigFormat, Retrieve, Update};

/// # Filesystem Configuration Backend
///
/// ## Structure
/// ``` no_rust
/// |- config.toml
/// ```
///
/// A missing config file is read as the default configuration.
#[derive(Debug, Clone)]
pub struct Fs<F> {
    pub dir: Arc<Path>,
    pub format: F,
}

impl<F> Fs<F>
where
    F: ConfigFormat,
{
    pub fn new(dir: impl AsRef<Path>, format: F) -> Self {
        Self {
            dir: Arc::from(dir.as_ref()),
            format,
        }
    }

    pub fn entrance_config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_STEM).with_extension(self.format.extension())
    }

    pub async fn collect_config(&self) -> Result<HostConfig, BoxError> {
        let path = self.entrance_config_path();
        tracing::trace!("[Wf.Config] retrieve config from {path:?}");
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let config: HostConfig = self.format.de(&bytes)?;
                tracing::debug!("[Wf.Config] config: {config:?}");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("[Wf.Config] config file {path:?} not found, use default config");
                Ok(HostConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save_config(&self, config: &HostConfig) -> Result<(), BoxError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = self.format.ser(config)?;
        tokio::fs::write(self.entrance_config_path(), &bytes).await?;
        Ok(())
    }
}

impl<F> Retrieve for Fs<F>
where
    F: ConfigFormat,
{
    async fn retrieve_config(&self) -> Result<HostConfig, BoxError> {
        self.collect_config().await
    }
}

impl<F> Update for Fs<F>
where
    F: ConfigFormat,
{
    async fn update_config(&self, config: HostConfig) -> Result<(), BoxError> {
        self.save_config(&config).await
    }
}

#[cfg(test)]
mod test {
    use weft_model::{PluginName, RenderMode};

    use super::*;
    use crate::service::config_format::{Json, Toml};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("weft-config-{name}-{pid}", pid = std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let fs = Fs::new(temp_dir("missing"), Toml::default());
        assert_eq!(fs.retrieve_config().await.unwrap(), HostConfig::default());
    }

    #[tokio::test]
    async fn test_read_toml() {
        let dir = temp_dir("toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            r#"
            [render]
            default_mode = "islands"
            island_path_prefix = "/_islands"

            [plugins]
            disabled = ["server-only-plugin"]
            "#,
        )
        .unwrap();
        let config = Fs::new(&dir, Toml::default()).retrieve_config().await.unwrap();
        assert_eq!(config.render.default_mode, RenderMode::Islands);
        assert_eq!(config.render.island_path_prefix, "/_islands");
        assert!(config.plugins.is_disabled("server-only-plugin"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_save_and_reload_json() {
        let dir = temp_dir("json");
        let fs = Fs::new(&dir, Json::default());
        let mut config = HostConfig::default();
        config.plugins.disabled.insert(PluginName::new("legacy").unwrap());
        fs.update_config(config.clone()).await.unwrap();
        assert!(fs.entrance_config_path().ends_with("config.json"));
        assert_eq!(fs.retrieve_config().await.unwrap(), config);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_invalid_file() {
        let dir = temp_dir("invalid");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.json"), r#"{"render": {"default_mode": "spa"}}"#).unwrap();
        assert!(Fs::new(&dir, Json::default()).retrieve_config().await.is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
