//! Serializable data shared by the weft host: plugin descriptors' declarative
//! parts, render modes and the host configuration.
pub mod plugin;
pub use plugin::*;

pub mod render;
pub use render::*;

pub mod config;
pub use config::*;

pub mod constants;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type BoxResult<T> = Result<T, BoxError>;
