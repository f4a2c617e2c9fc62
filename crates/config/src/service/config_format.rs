use std::ffi::OsStr;

use weft_model::BoxError;

mod json;
mod toml;
pub use self::json::Json;
pub use self::toml::Toml;

pub trait ConfigFormat: Send + Sync {
    fn extension(&self) -> &OsStr;
    /// # Errors
    /// If the bytes are not a valid document of this format.
    fn de<T: serde::de::DeserializeOwned>(&self, slice: &[u8]) -> Result<T, BoxError>;
    /// # Errors
    /// If the value can't be represented in this format.
    fn ser<T: serde::Serialize>(&self, t: &T) -> Result<Vec<u8>, BoxError>;
}
