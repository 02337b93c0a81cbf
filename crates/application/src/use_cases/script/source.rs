use crate::ports::{Cacher, SourceFetcher};
use bytes::Bytes;
use hostscript_domain::hosts_file::parse;
use hostscript_domain::{DomainError, HostsRecord};
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Where the payload of a source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit { ttl: Duration },
    Miss,
}

/// Result of processing one source URL.
#[derive(Debug)]
pub struct SourceOutcome {
    pub url: String,
    pub records: Vec<HostsRecord>,
    pub cache: CacheStatus,
    /// Fetch, cache write or parse failure. The source then contributes no records.
    pub error: Option<DomainError>,
}

impl SourceOutcome {
    pub fn failed(url: impl Into<String>, cache: CacheStatus, error: DomainError) -> Self {
        Self {
            url: url.into(),
            records: Vec::new(),
            cache,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn hostnames_count(&self) -> usize {
        self.records.iter().map(HostsRecord::hosts_count).sum()
    }
}

/// Resolve one source: cache first, remote fetch on a miss, then parse.
///
/// Never fails as a whole; every problem is recorded in the outcome.
pub async fn process_source(
    cacher: &dyn Cacher,
    fetcher: &dyn SourceFetcher,
    url: String,
    max_size: u64,
) -> SourceOutcome {
    match cacher.get(&url).await {
        Ok(Some(hit)) => {
            debug!(url = %url, ttl_secs = hit.ttl.as_secs(), "Source served from cache");
            let cache = CacheStatus::Hit { ttl: hit.ttl };
            return match parse_payload(&hit.data) {
                Ok(records) => SourceOutcome {
                    url,
                    records,
                    cache,
                    error: None,
                },
                Err(e) => SourceOutcome::failed(url, cache, e),
            };
        }
        Ok(None) => {}
        Err(e) => {
            warn!(url = %url, error = %e, "Cache read failed, fetching source");
        }
    }

    let data = match fetcher.fetch(&url, max_size).await {
        Ok(data) => data,
        Err(e) => {
            warn!(url = %url, error = %e, "Remote source fetching failed");
            return SourceOutcome::failed(url, CacheStatus::Miss, e.into());
        }
    };

    if let Err(e) = cacher.put(&url, data.clone()).await {
        error!(url = %url, error = %e, "Cache writing error");
        return SourceOutcome::failed(url, CacheStatus::Miss, e.into());
    }

    match parse_payload(&data) {
        Ok(records) => SourceOutcome {
            url,
            records,
            cache: CacheStatus::Miss,
            error: None,
        },
        Err(e) => SourceOutcome::failed(url, CacheStatus::Miss, e),
    }
}

fn parse_payload(data: &Bytes) -> Result<Vec<HostsRecord>, DomainError> {
    parse(Cursor::new(data.as_ref()))
}
