use async_trait::async_trait;
use bytes::Bytes;
use hostscript_domain::FetchError;

/// Port for retrieving a remote hosts file.
///
/// Implementations must bound latency (timeouts, redirect hops) and refuse
/// payloads whose declared or actual size reaches `max_size` bytes.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str, max_size: u64) -> Result<Bytes, FetchError>;
}
