#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use hostscript_application::ports::{CacheLookup, Cacher, SourceFetcher};
use hostscript_domain::{CacheError, FetchError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock Cacher
// ============================================================================

#[derive(Clone)]
pub struct MockCacher {
    entries: Arc<RwLock<HashMap<String, Bytes>>>,
    ttl: Duration,
    fail_puts: Arc<RwLock<bool>>,
    put_calls: Arc<AtomicUsize>,
}

impl MockCacher {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(1800),
            fail_puts: Arc::new(RwLock::new(false)),
            put_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every `put` fail with `CacheError::Closed`
    pub async fn set_fail_puts(&self, fail: bool) {
        *self.fail_puts.write().await = fail;
    }

    pub async fn insert(&self, key: &str, data: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), Bytes::from(data.to_string()));
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cacher for MockCacher {
    fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError> {
        Ok(self.entries.read().await.get(key).map(|data| CacheLookup {
            data: data.clone(),
            ttl: self.ttl - Duration::from_secs(1),
        }))
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<(), CacheError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_puts.read().await {
            return Err(CacheError::Closed);
        }
        self.entries.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

// ============================================================================
// Mock SourceFetcher
// ============================================================================

#[derive(Clone)]
struct MockResponse {
    result: Result<Bytes, FetchError>,
    delay: Duration,
    panics: bool,
}

#[derive(Clone)]
pub struct MockSourceFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockSourceFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Serve `body` for `url`
    pub async fn set_body(&self, url: &str, body: &str) {
        self.set_delayed_body(url, body, Duration::ZERO).await;
    }

    /// Serve `body` for `url` after `delay`
    pub async fn set_delayed_body(&self, url: &str, body: &str, delay: Duration) {
        self.responses.write().await.insert(
            url.to_string(),
            MockResponse {
                result: Ok(Bytes::from(body.to_string())),
                delay,
                panics: false,
            },
        );
    }

    /// Fail requests for `url` with `error`
    pub async fn set_error(&self, url: &str, error: FetchError) {
        self.responses.write().await.insert(
            url.to_string(),
            MockResponse {
                result: Err(error),
                delay: Duration::ZERO,
                panics: false,
            },
        );
    }

    /// Panic inside the fetch task for `url`
    pub async fn set_panic(&self, url: &str) {
        self.responses.write().await.insert(
            url.to_string(),
            MockResponse {
                result: Err(FetchError::Body(String::new())),
                delay: Duration::ZERO,
                panics: true,
            },
        );
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceFetcher for MockSourceFetcher {
    async fn fetch(&self, url: &str, _max_size: u64) -> Result<Bytes, FetchError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let response = self.responses.read().await.get(url).cloned();
        match response {
            Some(response) => {
                if response.panics {
                    panic!("fetcher exploded for {url}");
                }
                if !response.delay.is_zero() {
                    tokio::time::sleep(response.delay).await;
                }
                response.result
            }
            None => Err(FetchError::Status(404)),
        }
    }
}
