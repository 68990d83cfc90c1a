use crate::{
    APP_DIR_NAME, ApiConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, EndpointsConfig, GuardConfig, HttpConfig, LoggingConfig, RoutesConfig,
    StorageConfig, TenantConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub http: HttpConfig,
    pub endpoints: EndpointsConfig,
    pub tenant: TenantConfig,
    pub storage: StorageConfig,
    pub routes: RoutesConfig,
    pub guard: GuardConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for INV_CONFIG_DIR env var, else use ./.inv/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply INV_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: INV_CONFIG_DIR env var > ./.inv/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.http.validate()?;
        self.endpoints.validate()?;
        self.tenant.validate()?;
        self.storage.validate()?;
        self.routes.validate()?;
        self.guard.validate()?;
        Ok(())
    }

    /// Directory the file storage backend writes into.
    /// `storage.dir` (relative to the config dir) > platform data dir > config dir.
    pub fn storage_dir(&self) -> ConfigErrorResult<PathBuf> {
        if let Some(dir) = &self.storage.dir {
            return Ok(Self::config_dir()?.join(dir));
        }

        match dirs::data_local_dir() {
            Some(data_dir) => Ok(data_dir.join(APP_DIR_NAME)),
            None => Ok(Self::config_dir()?.join("storage")),
        }
    }

    /// Log configuration summary (NEVER logs credentials).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s, connect {}s)",
            self.api.base_url, self.http.timeout_secs, self.http.connect_timeout_secs
        );
        info!(
            "  endpoints: exchange={}, companies={}, switch={}",
            self.endpoints.identity_exchange,
            self.endpoints.my_companies,
            self.endpoints.switch_context
        );
        info!("  tenant: header={}", self.tenant.header_name);
        info!(
            "  storage: {:?} (keys: {}, {})",
            self.storage.backend, self.storage.credential_key, self.storage.tenant_key
        );
        info!(
            "  guard: lookup failure -> {}",
            self.guard.lookup_failure_route
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api / HTTP
        Self::apply_env_string("INV_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse("INV_HTTP_TIMEOUT_SECS", &mut self.http.timeout_secs);
        Self::apply_env_parse(
            "INV_HTTP_CONNECT_TIMEOUT_SECS",
            &mut self.http.connect_timeout_secs,
        );

        // Tenant
        Self::apply_env_string("INV_TENANT_HEADER", &mut self.tenant.header_name);

        // Storage
        Self::apply_env_parse("INV_STORAGE_BACKEND", &mut self.storage.backend);
        Self::apply_env_option_string("INV_STORAGE_DIR", &mut self.storage.dir);

        // Guard
        Self::apply_env_parse(
            "INV_GUARD_LOOKUP_FAILURE_ROUTE",
            &mut self.guard.lookup_failure_route,
        );

        // Logging
        Self::apply_env_parse("INV_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("INV_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("INV_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
