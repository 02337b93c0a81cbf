#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use hostscript_api::AppState;
use hostscript_application::ports::{CacheLookup, Cacher, SourceFetcher};
use hostscript_application::use_cases::{GenerateScriptUseCase, GetSettingsUseCase, ScriptSettings};
use hostscript_domain::{CacheError, Config, FetchError};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Cache that never stores anything; `ping` fails on demand.
#[derive(Default)]
pub struct StubCacher {
    pub unhealthy: AtomicBool,
}

#[async_trait]
impl Cacher for StubCacher {
    fn ttl(&self) -> Duration {
        Duration::from_secs(1800)
    }

    async fn get(&self, _key: &str) -> Result<Option<CacheLookup>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _data: Bytes) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        Ok(false)
    }

    async fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        if self.unhealthy.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Serves fixed bodies keyed by URL; delays every response by `delay`.
#[derive(Default)]
pub struct StaticFetcher {
    pub bodies: HashMap<String, String>,
    pub delay: Duration,
}

#[async_trait]
impl SourceFetcher for StaticFetcher {
    async fn fetch(&self, url: &str, _max_size: u64) -> Result<Bytes, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.bodies
            .get(url)
            .map(|body| Bytes::from(body.clone()))
            .ok_or(FetchError::Status(404))
    }
}

pub fn build_state(cacher: Arc<StubCacher>, fetcher: StaticFetcher) -> AppState {
    let config = Config::default();
    let settings = ScriptSettings {
        comment: "ADBlock".to_string(),
        default_redirect: IpAddr::V4(Ipv4Addr::LOCALHOST),
        max_sources: 3,
        max_source_size: 1024 * 1024,
        generator_version: "test".to_string(),
    };

    AppState {
        generate_script: Arc::new(GenerateScriptUseCase::new(
            cacher.clone(),
            Arc::new(fetcher),
            settings,
        )),
        get_settings: Arc::new(GetSettingsUseCase::new(&config)),
        cacher,
        shutdown: CancellationToken::new(),
        version: Arc::from("1.2.3"),
    }
}
