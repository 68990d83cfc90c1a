use crate::{ConfigError, ConfigErrorResult};

use inv_core::RouteTable;
use inv_core::navigation::route_table::{
    DEFAULT_COMPANY_CREATION_PATH, DEFAULT_COMPANY_SELECTION_PATH, DEFAULT_DASHBOARD_PATH,
    DEFAULT_SIGN_IN_PATH,
};

use serde::Deserialize;

/// Router paths for the entry points the guard and identity store redirect to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub sign_in: String,
    pub company_creation: String,
    pub company_selection: String,
    pub dashboard: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            sign_in: DEFAULT_SIGN_IN_PATH.to_string(),
            company_creation: DEFAULT_COMPANY_CREATION_PATH.to_string(),
            company_selection: DEFAULT_COMPANY_SELECTION_PATH.to_string(),
            dashboard: DEFAULT_DASHBOARD_PATH.to_string(),
        }
    }
}

impl RoutesConfig {
    pub fn route_table(&self) -> RouteTable {
        RouteTable {
            sign_in: self.sign_in.clone(),
            company_creation: self.company_creation.clone(),
            company_selection: self.company_selection.clone(),
            dashboard: self.dashboard.clone(),
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let named = [
            ("sign_in", &self.sign_in),
            ("company_creation", &self.company_creation),
            ("company_selection", &self.company_selection),
            ("dashboard", &self.dashboard),
        ];

        for (name, path) in named {
            if !path.starts_with('/') {
                return Err(ConfigError::routes(format!(
                    "routes.{name} must start with '/', got '{path}'"
                )));
            }
        }

        if self.sign_in == self.dashboard {
            return Err(ConfigError::routes(
                "routes.sign_in and routes.dashboard must differ",
            ));
        }

        Ok(())
    }
}
