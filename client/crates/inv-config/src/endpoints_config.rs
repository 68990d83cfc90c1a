use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

/// Backend paths the tenant-context core talks to or must recognise.
///
/// All paths are relative to `api.base_url` and matched as path prefixes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Every identity endpoint lives under this prefix
    pub identity_prefix: String,
    /// POST identity assertion -> credential
    pub identity_exchange: String,
    pub identity_health: String,
    /// Tenant bootstrap listing (reachable before a tenant is chosen)
    pub tenant_bootstrap: String,
    /// GET memberships of the signed-in user
    pub my_companies: String,
    /// PUT switch the session to another tenant
    pub switch_context: String,
    pub platform_health: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            identity_prefix: String::from("/auth"),
            identity_exchange: String::from("/auth/google"),
            identity_health: String::from("/auth/health"),
            tenant_bootstrap: String::from("/tenants"),
            my_companies: String::from("/users/me/companies"),
            switch_context: String::from("/users/me/context"),
            platform_health: String::from("/health"),
        }
    }
}

impl EndpointsConfig {
    /// Endpoints that never receive a credential.
    pub fn public_endpoints(&self) -> Vec<String> {
        vec![
            self.identity_exchange.clone(),
            self.identity_health.clone(),
            self.tenant_bootstrap.clone(),
            self.platform_health.clone(),
        ]
    }

    /// Endpoints that never receive a tenant header.
    pub fn tenant_agnostic_endpoints(&self) -> Vec<String> {
        vec![
            self.identity_prefix.clone(),
            self.tenant_bootstrap.clone(),
            self.my_companies.clone(),
            self.switch_context.clone(),
            self.platform_health.clone(),
        ]
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let named = [
            ("identity_prefix", &self.identity_prefix),
            ("identity_exchange", &self.identity_exchange),
            ("identity_health", &self.identity_health),
            ("tenant_bootstrap", &self.tenant_bootstrap),
            ("my_companies", &self.my_companies),
            ("switch_context", &self.switch_context),
            ("platform_health", &self.platform_health),
        ];

        for (name, path) in named {
            if !path.starts_with('/') || path.len() < 2 {
                return Err(ConfigError::endpoints(format!(
                    "endpoints.{name} must be a non-root path starting with '/', got '{path}'"
                )));
            }
        }

        Ok(())
    }
}
