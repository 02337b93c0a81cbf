use super::{InMemoryCache, RedisCache};
use hostscript_application::ports::Cacher;
use hostscript_domain::config::{CacheConfig, CacheEngine};
use hostscript_domain::DomainError;
use std::sync::Arc;
use tracing::info;

/// Build the cache engine selected by configuration.
///
/// The redis engine is connected (and pinged) before returning, so an
/// unreachable server is reported at startup.
pub async fn build_cacher(config: &CacheConfig) -> Result<Arc<dyn Cacher>, DomainError> {
    info!(engine = %config.engine, ttl_secs = config.ttl, "Building cache engine");

    match config.engine {
        CacheEngine::Memory => Ok(Arc::new(InMemoryCache::new(
            config.ttl(),
            config.cleanup_interval(),
        ))),
        CacheEngine::Redis => {
            let cache =
                RedisCache::connect(&config.redis_dsn, config.ttl(), config.redis_timeout())
                    .await?;
            Ok(Arc::new(cache))
        }
    }
}
