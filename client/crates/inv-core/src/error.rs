use crate::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage IO error for key '{key}' at {path}: {source} {location}")]
    StorageIo {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Storage lock poisoned {location}")]
    LockPoisoned { location: ErrorLocation },

    #[error("Invalid storage key '{key}': {message} {location}")]
    InvalidKey {
        key: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid route '{value}' {location}")]
    InvalidRoute {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Whether retrying the storage operation could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StorageIo { .. })
    }

    #[track_caller]
    pub fn storage_io(key: impl Into<String>, path: PathBuf, source: std::io::Error) -> Self {
        Self::StorageIo {
            key: key.into(),
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn lock_poisoned() -> Self {
        Self::LockPoisoned {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_route(value: impl Into<String>) -> Self {
        Self::InvalidRoute {
            value: value.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
