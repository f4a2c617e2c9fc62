use std::ffi::{OsStr, OsString};

use weft_model::BoxError;

use super::ConfigFormat;
#[derive(Debug, Clone)]
pub struct Toml {
    pub extension: OsString,
}

impl Default for Toml {
    fn default() -> Self {
        Self {
            extension: OsString::from("toml"),
        }
    }
}

impl ConfigFormat for Toml {
    fn extension(&self) -> &OsStr {
        &self.extension
    }
    fn de<T: serde::de::DeserializeOwned>(&self, slice: &[u8]) -> Result<T, BoxError> {
        Ok(toml::from_str(std::str::from_utf8(slice)?)?)
    }
    fn ser<T: serde::Serialize>(&self, t: &T) -> Result<Vec<u8>, BoxError> {
        Ok(toml::to_string_pretty(t)?.into())
    }
}

#[cfg(test)]
mod test {
    use weft_model::HostConfig;

    use super::*;

    #[test]
    fn test_de_rejects_invalid_utf8() {
        let format = Toml::default();
        let config: HostConfig = format.de(b"[plugins]\ndisabled = [\"server-only-plugin\"]\n").unwrap();
        assert!(config.plugins.is_disabled("server-only-plugin"));

        let corrupt = b"[plugins]\ndisabled = [\"server-only-\xff\"]\n";
        assert!(format.de::<HostConfig>(corrupt).is_err());
    }
}
