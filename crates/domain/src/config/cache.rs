use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Storage backend used for fetched hosts files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheEngine {
    Memory,
    Redis,
}

impl fmt::Display for CacheEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheEngine::Memory => f.write_str("memory"),
            CacheEngine::Redis => f.write_str("redis"),
        }
    }
}

impl FromStr for CacheEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "inmemory" => Ok(CacheEngine::Memory),
            "redis" => Ok(CacheEngine::Redis),
            other => Err(format!("unsupported cache engine: {other}")),
        }
    }
}

/// Upper bound for `cache.ttl` (30 days).
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Cache engine: "memory" or "redis" (default: "memory")
    #[serde(default = "default_engine")]
    pub engine: CacheEngine,

    /// Lifetime of a cached source in seconds (default: 1800)
    #[serde(default = "default_ttl")]
    pub ttl: u64,

    /// Expired entries sweep interval in seconds, memory engine only (default: 30)
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,

    /// Redis connection string (default: "redis://127.0.0.1:6379/0")
    #[serde(default = "default_redis_dsn")]
    pub redis_dsn: String,

    /// Bound for a single redis round trip in milliseconds (default: 2000)
    #[serde(default = "default_redis_timeout")]
    pub redis_timeout_ms: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }

    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            ttl: default_ttl(),
            cleanup_interval: default_cleanup_interval(),
            redis_dsn: default_redis_dsn(),
            redis_timeout_ms: default_redis_timeout(),
        }
    }
}

fn default_engine() -> CacheEngine {
    CacheEngine::Memory
}

fn default_ttl() -> u64 {
    1800
}

fn default_cleanup_interval() -> u64 {
    30
}

fn default_redis_dsn() -> String {
    "redis://127.0.0.1:6379/0".to_string()
}

fn default_redis_timeout() -> u64 {
    2000
}
