use crate::{ConfigError, ConfigErrorResult, DEFAULT_CREDENTIAL_KEY, DEFAULT_TENANT_KEY};

use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives the process
    Memory,
    /// One file per key under `storage.dir`
    File,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(ConfigError::storage(format!(
                "storage.backend must be 'memory' or 'file', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Relative to the config dir; None = platform data dir
    pub dir: Option<String>,
    pub credential_key: String,
    /// Kept apart from the credential so the last tenant survives a credential expiry
    pub tenant_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            dir: None,
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            tenant_key: DEFAULT_TENANT_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, key) in [
            ("credential_key", &self.credential_key),
            ("tenant_key", &self.tenant_key),
        ] {
            if key.is_empty()
                || key.starts_with('.')
                || !key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(ConfigError::storage(format!(
                    "storage.{name} must be a plain file-safe name, got '{key}'"
                )));
            }
        }

        if self.credential_key == self.tenant_key {
            return Err(ConfigError::storage(
                "storage.credential_key and storage.tenant_key must differ",
            ));
        }

        if let Some(dir) = &self.dir {
            let path = std::path::Path::new(dir);
            if path.is_absolute() || dir.contains("..") {
                return Err(ConfigError::storage(
                    "storage.dir must be relative and cannot contain '..'",
                ));
            }
        }

        Ok(())
    }
}
