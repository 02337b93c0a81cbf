use async_trait::async_trait;
use bytes::Bytes;
use hostscript_application::ports::{CacheLookup, Cacher};
use hostscript_domain::CacheError;
use redis::aio::ConnectionManager;
use redis::RedisError;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

const KEY_PREFIX: &str = "cache:";

/// Cache engine backed by a remote redis server.
///
/// Keys are hashed so arbitrary source URLs map to fixed-size redis keys.
/// Expiry is delegated to redis itself (`SET .. PX`).
pub struct RedisCache {
    conn: ConnectionManager,
    ttl: Duration,
    timeout: Duration,
    closed: AtomicBool,
}

impl RedisCache {
    /// Connect to `dsn` and verify the server answers `PING`.
    pub async fn connect(dsn: &str, ttl: Duration, timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(dsn).map_err(backend)?;

        let conn = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(backend)?;

        let cache = Self {
            conn,
            ttl,
            timeout,
            closed: AtomicBool::new(false),
        };
        cache.ping().await?;

        info!(ttl_secs = ttl.as_secs(), "Connected to redis cache");
        Ok(cache)
    }

    /// `cache:` followed by the hex SHA-256 of `key`.
    pub fn storage_key(key: &str) -> String {
        let digest = Sha256::digest(key.as_bytes());
        let mut out = String::with_capacity(KEY_PREFIX.len() + digest.len() * 2);
        out.push_str(KEY_PREFIX);
        for byte in digest {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }

    fn ensure_open(&self) -> Result<(), CacheError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Closed);
        }
        Ok(())
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| CacheError::Timeout)?
            .map_err(backend)
    }
}

fn backend(e: RedisError) -> CacheError {
    CacheError::Backend(e.to_string())
}

#[async_trait]
impl Cacher for RedisCache {
    fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        let storage_key = Self::storage_key(key);
        let mut conn = self.conn.clone();

        let data: Option<Vec<u8>> = self
            .bounded(redis::cmd("GET").arg(&storage_key).query_async(&mut conn))
            .await?;
        let Some(data) = data else {
            return Ok(None);
        };

        // -2: key vanished after GET, -1: no expiry set.
        let pttl: i64 = self
            .bounded(redis::cmd("PTTL").arg(&storage_key).query_async(&mut conn))
            .await?;
        if pttl == -2 {
            return Ok(None);
        }

        debug!(key, pttl, "Redis cache hit");
        Ok(Some(CacheLookup {
            data: Bytes::from(data),
            ttl: Duration::from_millis(pttl.max(0) as u64),
        }))
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<(), CacheError> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        if data.is_empty() {
            return Err(CacheError::EmptyData);
        }

        let mut conn = self.conn.clone();
        let ttl_ms = u64::try_from(self.ttl.as_millis()).map_err(|_| CacheError::TtlOutOfRange)?;

        self.bounded::<(), _>(
            redis::cmd("SET")
                .arg(Self::storage_key(key))
                .arg(data.as_ref())
                .arg("PX")
                .arg(ttl_ms)
                .query_async(&mut conn),
        )
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        let mut conn = self.conn.clone();
        let removed: i64 = self
            .bounded(
                redis::cmd("DEL")
                    .arg(Self::storage_key(key))
                    .query_async(&mut conn),
            )
            .await?;
        Ok(removed > 0)
    }

    async fn close(&self) -> Result<(), CacheError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(CacheError::Closed);
        }
        info!("Redis cache closed");
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.ensure_open()?;
        let mut conn = self.conn.clone();
        let _: String = self
            .bounded(redis::cmd("PING").query_async(&mut conn))
            .await?;
        Ok(())
    }
}
