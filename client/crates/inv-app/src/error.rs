use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] inv_config::ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] inv_core::CoreError),

    #[error("Client error: {0}")]
    Client(#[from] inv_client::ClientError),

    #[error("Auth error: {0}")]
    Auth(#[from] inv_auth::AuthError),

    #[error("Tenant error: {0}")]
    Tenant(#[from] inv_tenant::TenantError),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
