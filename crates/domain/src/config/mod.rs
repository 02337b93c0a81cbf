//! Configuration module for the hosts script generator
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP listener
//! - `cache`: Cache engine selection and lifetimes
//! - `router_script`: Script generation limits and defaults
//! - `sources`: Catalogue of well-known hosts-file sources
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;
pub mod router_script;
pub mod server;
pub mod sources;

pub use cache::{CacheConfig, CacheEngine, MAX_CACHE_TTL_SECS};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use router_script::RouterScriptConfig;
pub use server::ServerConfig;
pub use sources::SourceConfig;
