use async_trait::async_trait;
use bytes::Bytes;
use hostscript_domain::CacheError;
use std::time::Duration;

/// A cached payload together with its remaining lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    pub data: Bytes,
    pub ttl: Duration,
}

/// Application-layer port for TTL-bounded byte storage.
///
/// Implementations live in the infrastructure layer (in-memory, redis) and
/// are selected once at startup. Every method is safe to call from any number
/// of tasks at once.
///
/// Contract shared by all engines:
///   - an empty key fails with `CacheError::EmptyKey`
///   - an empty payload on `put` fails with `CacheError::EmptyData`
///   - any call after `close` fails with `CacheError::Closed`
///   - an unknown or expired key is `Ok(None)`, not an error
#[async_trait]
pub trait Cacher: Send + Sync {
    /// Lifetime applied to every `put`.
    fn ttl(&self) -> Duration;

    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError>;

    async fn put(&self, key: &str, data: Bytes) -> Result<(), CacheError>;

    /// Returns `true` when an entry was actually removed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Release the engine. A second call fails with `CacheError::Closed`.
    async fn close(&self) -> Result<(), CacheError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
