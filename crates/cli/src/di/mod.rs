use hostscript_api::AppState;
use hostscript_application::use_cases::{GenerateScriptUseCase, GetSettingsUseCase, ScriptSettings};
use hostscript_domain::Config;
use hostscript_infrastructure::{build_cacher, HttpSourceFetcher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire the cache engine, the source fetcher and the use cases together.
pub async fn build_app_state(
    config: &Config,
    shutdown: CancellationToken,
) -> anyhow::Result<AppState> {
    let cacher = build_cacher(&config.cache).await?;

    let user_agent = format!("hostscript/{VERSION}");
    let fetcher = Arc::new(HttpSourceFetcher::new(&user_agent)?);

    let settings = ScriptSettings {
        comment: config.router_script.comment.clone(),
        default_redirect: config.redirect_ip()?,
        max_sources: usize::from(config.router_script.max_sources),
        max_source_size: config.router_script.max_source_size,
        generator_version: VERSION.to_string(),
    };

    info!(
        engine = %config.cache.engine,
        max_sources = settings.max_sources,
        max_source_size = settings.max_source_size,
        "Use cases initialized"
    );

    Ok(AppState {
        generate_script: Arc::new(GenerateScriptUseCase::new(
            Arc::clone(&cacher),
            fetcher,
            settings,
        )),
        get_settings: Arc::new(GetSettingsUseCase::new(config)),
        cacher,
        shutdown,
        version: Arc::from(VERSION),
    })
}
