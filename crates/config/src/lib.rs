#![warn(clippy::indexing_slicing, clippy::unwrap_used, clippy::dbg_macro, clippy::undocumented_unsafe_blocks)]
//! This crate is aim to load the configuration of the weft host from various backends.

/// Configuration backends and services traits
pub mod service;

pub use weft_model::{BoxError, BoxResult, HostConfig, PluginsConfig, RenderConfig};
