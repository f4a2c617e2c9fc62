use std::sync::{Arc, RwLock};

use weft_model::{BoxError, HostConfig};

use super::{Retrieve, Update};

/// In-memory Config Backend
#[derive(Debug, Clone, Default)]
pub struct Memory {
    pub config: Arc<RwLock<HostConfig>>,
}

impl Memory {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }
}

impl Retrieve for Memory {
    async fn retrieve_config(&self) -> Result<HostConfig, BoxError> {
        Ok(self.config.read().map_err(|e| e.to_string())?.clone())
    }
}

impl Update for Memory {
    async fn update_config(&self, config: HostConfig) -> Result<(), BoxError> {
        *self.config.write().map_err(|e| e.to_string())? = config;
        Ok(())
    }
}
