use inv_auth::AuthError;
use inv_client::ClientError;
use inv_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenantError {
    #[error("Tenant context storage failed: {source} {location}")]
    Storage {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Context switch failed: {source} {location}")]
    Switch {
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Storing switched credential failed: {source} {location}")]
    Credential {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Invalid tenant header name '{name}' {location}")]
    InvalidHeader {
        name: String,
        location: ErrorLocation,
    },
}

impl TenantError {
    #[track_caller]
    pub fn switch(source: ClientError) -> Self {
        Self::Switch {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The underlying HTTP error of a failed switch, for user-facing messages.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Switch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CoreError> for TenantError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for TenantError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Credential {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, TenantError>;
