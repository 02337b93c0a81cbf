use super::in_memory::CacheEntry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Background worker that periodically drops expired entries.
pub struct CacheSweeper {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl CacheSweeper {
    /// Spawn the sweep loop on the current tokio runtime.
    pub fn spawn(entries: Arc<DashMap<String, CacheEntry>>, every: Duration) -> Self {
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        info!(interval_secs = every.as_secs(), "Starting cache sweeper");

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("CacheSweeper: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = sweep(&entries, Instant::now());
                        if removed > 0 {
                            debug!(removed, remaining = entries.len(), "CacheSweeper: expired entries removed");
                        }
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Signal the loop to exit and wait for it.
    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "CacheSweeper: task terminated abnormally");
        }
    }
}

/// Remove every entry expired at `now`. Returns the number removed.
pub(crate) fn sweep(entries: &DashMap<String, CacheEntry>, now: Instant) -> usize {
    let mut removed = 0;
    entries.retain(|_, entry| {
        if entry.is_expired(now) {
            removed += 1;
            false
        } else {
            true
        }
    });
    removed
}
