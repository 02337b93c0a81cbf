use super::aggregate::aggregate;
use super::report::{write_script, ScriptReport};
use super::source::{process_source, CacheStatus, SourceOutcome};
use crate::ports::{Cacher, SourceFetcher};
use hostscript_domain::{DomainError, RequestParams};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// Static settings of the generator, taken from configuration at startup.
#[derive(Debug, Clone)]
pub struct ScriptSettings {
    /// Comment attached to every generated entry.
    pub comment: String,
    pub default_redirect: IpAddr,
    pub max_sources: usize,
    pub max_source_size: u64,
    pub generator_version: String,
}

/// A rendered script ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    pub body: String,
    pub entries_count: usize,
    pub ignored_count: usize,
    pub failed_sources: usize,
}

impl GeneratedScript {
    /// No hostname survived aggregation; the body only carries comments.
    pub fn is_empty(&self) -> bool {
        self.entries_count == 0
    }
}

/// Turns a list of remote hosts files into one RouterOS script.
///
/// Pipeline per request:
///   1. Validate query parameters (no network activity on failure)
///   2. Fan out one task per source: cache → fetch → cache write → parse
///   3. Join every task before touching the results
///   4. Reduce into a bounded, deduplicated hostname set
///   5. Sort by hostname and render
///
/// Dropping the returned future aborts every outstanding source task.
pub struct GenerateScriptUseCase {
    cacher: Arc<dyn Cacher>,
    fetcher: Arc<dyn SourceFetcher>,
    settings: ScriptSettings,
}

impl GenerateScriptUseCase {
    pub fn new(
        cacher: Arc<dyn Cacher>,
        fetcher: Arc<dyn SourceFetcher>,
        settings: ScriptSettings,
    ) -> Self {
        Self {
            cacher,
            fetcher,
            settings,
        }
    }

    pub fn settings(&self) -> &ScriptSettings {
        &self.settings
    }

    /// Parse `query` into request parameters, honouring configured bounds.
    pub fn parse_params(&self, query: &str) -> Result<RequestParams, DomainError> {
        Ok(RequestParams::from_query_string(
            query,
            self.settings.default_redirect,
            self.settings.max_sources,
        )?)
    }

    /// Generate a script from a raw query string.
    #[instrument(skip(self, cancel))]
    pub async fn execute(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<GeneratedScript, DomainError> {
        let params = self.parse_params(query)?;
        self.generate(&params, cancel).await
    }

    /// Generate a script from already validated parameters.
    pub async fn generate(
        &self,
        params: &RequestParams,
        cancel: &CancellationToken,
    ) -> Result<GeneratedScript, DomainError> {
        let outcomes = self.collect_sources(params, cancel).await?;

        let aggregation = aggregate(params, &outcomes);
        let entries = aggregation.to_entries(params.redirect_to, &self.settings.comment);
        let failed_sources = outcomes.iter().filter(|o| !o.is_ok()).count();

        let report = ScriptReport {
            generated_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            generator_version: &self.settings.generator_version,
            cache_lifetime: self.cacher.ttl(),
            params,
            outcomes: &outcomes,
            aggregation: &aggregation,
            entries: &entries,
        };

        let mut body = Vec::with_capacity(256 + entries.len() * 96);
        let entries_count =
            write_script(&mut body, &report).map_err(|e| DomainError::Render(e.to_string()))?;

        info!(
            sources = params.sources.len(),
            failed_sources,
            entries = entries_count,
            ignored = aggregation.ignored(),
            "Script generated"
        );

        Ok(GeneratedScript {
            body: String::from_utf8_lossy(&body).into_owned(),
            entries_count,
            ignored_count: aggregation.ignored(),
            failed_sources,
        })
    }

    /// Fan out one task per source and wait for all of them.
    ///
    /// Results are returned in source order regardless of completion order.
    async fn collect_sources(
        &self,
        params: &RequestParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<SourceOutcome>, DomainError> {
        let mut tasks = JoinSet::new();
        let mut task_slots = HashMap::with_capacity(params.sources.len());

        for (idx, url) in params.sources.iter().enumerate() {
            let cacher = Arc::clone(&self.cacher);
            let fetcher = Arc::clone(&self.fetcher);
            let token = cancel.clone();
            let url = url.clone();
            let max_size = self.settings.max_source_size;

            let handle = tasks.spawn(async move {
                let outcome = tokio::select! {
                    _ = token.cancelled() => {
                        SourceOutcome::failed(url, CacheStatus::Miss, DomainError::Cancelled)
                    }
                    outcome = process_source(cacher.as_ref(), fetcher.as_ref(), url.clone(), max_size) => outcome,
                };
                (idx, outcome)
            });
            task_slots.insert(handle.id(), idx);
        }

        let mut slots: Vec<Option<SourceOutcome>> =
            std::iter::repeat_with(|| None).take(params.sources.len()).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, outcome)) => slots[idx] = Some(outcome),
                Err(e) => {
                    error!(error = %e, "Source task terminated abnormally");
                    if let Some(&idx) = task_slots.get(&e.id()) {
                        let url = params.sources[idx].clone();
                        slots[idx] = Some(SourceOutcome::failed(
                            url,
                            CacheStatus::Miss,
                            DomainError::TaskFailed(e.to_string()),
                        ));
                    }
                }
            }
        }

        if cancel.is_cancelled() {
            warn!("Script generation cancelled");
            return Err(DomainError::Cancelled);
        }

        Ok(slots
            .into_iter()
            .zip(&params.sources)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    SourceOutcome::failed(
                        url.clone(),
                        CacheStatus::Miss,
                        DomainError::TaskFailed("no result".to_string()),
                    )
                })
            })
            .collect())
    }
}
