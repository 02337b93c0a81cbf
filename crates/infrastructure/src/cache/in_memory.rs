use super::sweeper::{sweep, CacheSweeper};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use hostscript_application::ports::{CacheLookup, Cacher};
use hostscript_domain::CacheError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A stored payload and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Bytes,
    pub expires_at: Instant,
}

impl CacheEntry {
    /// `None` when `ttl` reaches past what `Instant` can represent.
    pub fn new(data: Bytes, ttl: Duration) -> Option<Self> {
        let expires_at = Instant::now().checked_add(ttl)?;
        Some(Self { data, expires_at })
    }

    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    /// Remaining lifetime, zero once expired.
    #[inline]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// Process-local cache engine.
///
/// Entries expire through two paths: a periodic sweep run by [`CacheSweeper`]
/// and a lazy check on every read. Reads and writes on distinct keys do not
/// contend thanks to the sharded map.
pub struct InMemoryCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    closed: AtomicBool,
    sweeper: Mutex<Option<CacheSweeper>>,
}

impl InMemoryCache {
    /// Create the cache and start its sweeper. Must be called within a tokio runtime.
    pub fn new(ttl: Duration, cleanup_interval: Duration) -> Self {
        let entries = Arc::new(DashMap::new());
        let sweeper = CacheSweeper::spawn(Arc::clone(&entries), cleanup_interval);

        info!(
            ttl_secs = ttl.as_secs(),
            cleanup_interval_secs = cleanup_interval.as_secs(),
            "Initializing in-memory cache"
        );

        Self {
            entries,
            ttl,
            closed: AtomicBool::new(false),
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry now. Returns the number removed.
    pub fn sweep_expired(&self) -> usize {
        sweep(&self.entries, Instant::now())
    }

    fn ensure_open(&self) -> Result<(), CacheError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl Cacher for InMemoryCache {
    fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        let now = Instant::now();
        let lookup = match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if entry.is_expired(now) => None,
            Some(entry) => Some(CacheLookup {
                data: entry.data.clone(),
                ttl: entry.remaining(now),
            }),
        };

        if lookup.is_none() {
            // Expired between sweeps.
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
            debug!(key, "Expired cache entry removed on read");
        }

        Ok(lookup)
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<(), CacheError> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        if data.is_empty() {
            return Err(CacheError::EmptyData);
        }

        let entry = CacheEntry::new(data, self.ttl).ok_or(CacheError::TtlOutOfRange)?;
        self.entries.insert(key.to_string(), entry);

        // A concurrent close may have cleared the map before this insert.
        if self.closed.load(Ordering::Acquire) {
            self.entries.remove(key);
            return Err(CacheError::Closed);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.ensure_open()?;
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        Ok(self.entries.remove(key).is_some())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.ensure_open()
    }

    async fn close(&self) -> Result<(), CacheError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(CacheError::Closed);
        }

        let sweeper = self.sweeper.lock().await.take();
        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
        }
        self.entries.clear();

        info!("In-memory cache closed");
        Ok(())
    }
}
