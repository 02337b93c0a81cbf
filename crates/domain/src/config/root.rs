use super::cache::{CacheConfig, CacheEngine, MAX_CACHE_TTL_SECS};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::router_script::RouterScriptConfig;
use super::server::ServerConfig;
use super::sources::SourceConfig;
use crate::validators::contains_illegal_symbols;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub router_script: RouterScriptConfig,

    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values passed on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen_address: Option<String>,
    pub port: Option<u16>,
    pub cache_engine: Option<CacheEngine>,
    pub cache_ttl: Option<u64>,
    pub redis_dsn: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from an optional TOML file, then apply CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(overrides);

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(addr) = overrides.listen_address {
            self.server.listen_address = addr;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(engine) = overrides.cache_engine {
            self.cache.engine = engine;
        }
        if let Some(ttl) = overrides.cache_ttl {
            self.cache.ttl = ttl;
        }
        if let Some(dsn) = overrides.redis_dsn {
            self.cache.redis_dsn = dsn;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let script = &self.router_script;

        if contains_illegal_symbols(&script.comment) {
            return Err(ConfigError::Invalid(
                "router_script.comment contains illegal symbols".to_string(),
            ));
        }
        if script.max_sources == 0 {
            return Err(ConfigError::Invalid(
                "router_script.max_sources must be greater than zero".to_string(),
            ));
        }
        if script.max_source_size == 0 {
            return Err(ConfigError::Invalid(
                "router_script.max_source_size must be greater than zero".to_string(),
            ));
        }
        self.redirect_ip()?;

        if self.cache.ttl == 0 {
            return Err(ConfigError::Invalid(
                "cache.ttl must be greater than zero".to_string(),
            ));
        }
        if self.cache.ttl > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::Invalid(format!(
                "cache.ttl must not exceed {MAX_CACHE_TTL_SECS} seconds"
            )));
        }
        if self.cache.engine == CacheEngine::Memory && self.cache.cleanup_interval == 0 {
            return Err(ConfigError::Invalid(
                "cache.cleanup_interval must be greater than zero".to_string(),
            ));
        }
        if self.cache.engine == CacheEngine::Redis && self.cache.redis_dsn.is_empty() {
            return Err(ConfigError::Invalid(
                "cache.redis_dsn is required for the redis engine".to_string(),
            ));
        }

        Ok(())
    }

    /// Default redirect address for generated entries.
    pub fn redirect_ip(&self) -> Result<IpAddr, ConfigError> {
        self.router_script
            .redirect_address
            .parse()
            .map_err(|_| {
                ConfigError::Invalid(format!(
                    "router_script.redirect_address [{}] is not an IP address",
                    self.router_script.redirect_address
                ))
            })
    }
}
