#[cfg(feature = "server-only")]
pub mod server_only;
