mod api_config;
mod config;
mod endpoints_config;
mod error;
mod guard_config;
mod http_config;
mod log_level;
mod logging_config;
mod routes_config;
mod storage_config;
mod tenant_config;

pub use api_config::ApiConfig;
pub use config::Config;
pub use endpoints_config::EndpointsConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use guard_config::GuardConfig;
pub use http_config::HttpConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use routes_config::RoutesConfig;
pub use storage_config::{StorageBackend, StorageConfig};
pub use tenant_config::TenantConfig;

const CONFIG_DIR_ENV: &str = "INV_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".inv";
const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR_NAME: &str = "inventory-client";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

// HTTP constraints
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_TENANT_HEADER: &str = "X-Tenant-ID";

const DEFAULT_CREDENTIAL_KEY: &str = "credential";
const DEFAULT_TENANT_KEY: &str = "tenant-context";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
