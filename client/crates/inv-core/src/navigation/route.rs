use crate::CoreError;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Entry points the tenant-context core can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    SignIn,
    CompanyCreation,
    CompanySelection,
    Dashboard,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::SignIn,
        Route::CompanyCreation,
        Route::CompanySelection,
        Route::Dashboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::CompanyCreation => "company-creation",
            Self::CompanySelection => "company-selection",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|route| route.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| CoreError::invalid_route(s))
    }
}
