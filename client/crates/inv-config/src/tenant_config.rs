use crate::{ConfigError, ConfigErrorResult, DEFAULT_TENANT_HEADER};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    /// Header carrying the selected tenant id on tenant-scoped requests
    pub header_name: String,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_TENANT_HEADER.to_string(),
        }
    }
}

impl TenantConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let valid = !self.header_name.is_empty()
            && self
                .header_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(ConfigError::tenant(format!(
                "tenant.header_name must be a non-empty HTTP header token, got '{}'",
                self.header_name
            )));
        }

        if self.header_name.eq_ignore_ascii_case("authorization") {
            return Err(ConfigError::tenant(
                "tenant.header_name cannot be 'Authorization'",
            ));
        }

        Ok(())
    }
}
