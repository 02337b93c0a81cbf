use hostscript_domain::{CliOverrides, Config};
use tracing::info;

/// Load and validate configuration. Any error here is fatal.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Must run after the logger is installed.
pub fn log_config_summary(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        listen = %config.server.bind_address(),
        cache_engine = %config.cache.engine,
        cache_ttl_secs = config.cache.ttl,
        max_sources = config.router_script.max_sources,
        sources = config.sources.len(),
        "Configuration loaded"
    );
}
