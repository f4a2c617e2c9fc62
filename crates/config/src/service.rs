use futures_util::Future;
use weft_model::{BoxError, HostConfig};

/// Config file format
pub mod config_format;
/// File system backend
#[cfg(feature = "fs")]
pub mod fs;
/// In-memory backend
pub mod memory;

pub trait Retrieve: Sync + Send {
    fn retrieve_config(&self) -> impl Future<Output = Result<HostConfig, BoxError>> + Send;
}

pub trait Update: Sync + Send {
    fn update_config(&self, config: HostConfig) -> impl Future<Output = Result<(), BoxError>> + Send;
}
