use crate::{ConfigError, ConfigErrorResult};

use inv_core::Route;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where to send the user when the membership lookup fails.
    /// Defaults to company creation, the same target as "zero companies".
    pub lookup_failure_route: Route,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            lookup_failure_route: Route::CompanyCreation,
        }
    }
}

impl GuardConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // The dashboard is itself guarded; redirecting there would loop.
        if self.lookup_failure_route == Route::Dashboard {
            return Err(ConfigError::config(
                "guard.lookup_failure_route cannot be 'dashboard'",
            ));
        }
        Ok(())
    }
}
