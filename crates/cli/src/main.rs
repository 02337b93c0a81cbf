//! # Hostscript
//!
//! Turns hosts-file blocklists into a RouterOS `/ip dns static` script,
//! served over HTTP.

mod bootstrap;
mod di;
mod healthcheck;
mod server;

use clap::{Args, Parser, Subcommand};
use hostscript_domain::{CacheEngine, CliOverrides};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "hostscript")]
#[command(version)]
#[command(about = "RouterOS DNS static script generator for hosts-file blocklists")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Check that a running server answers on `/live`
    Healthcheck(HealthcheckArgs),
    /// Print the version and exit
    Version,
}

#[derive(Args)]
struct HealthcheckArgs {
    /// Base URL of the server to check
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Give up after this many seconds
    #[arg(short = 't', long, default_value_t = 5)]
    timeout: u64,
}

#[derive(Args)]
struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Listen address
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Cache engine: memory or redis
    #[arg(long)]
    cache_engine: Option<CacheEngine>,

    /// Cached source lifetime in seconds
    #[arg(long)]
    cache_ttl: Option<u64>,

    /// Redis connection string
    #[arg(long)]
    redis_dsn: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl ServeArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            listen_address: self.listen.clone(),
            port: self.port,
            cache_engine: self.cache_engine,
            cache_ttl: self.cache_ttl,
            redis_dsn: self.redis_dsn.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("{}", di::VERSION);
            Ok(())
        }
        Command::Healthcheck(args) => {
            healthcheck::check_liveness(&args.url, Duration::from_secs(args.timeout)).await
        }
        Command::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config_path = args.config.as_deref();
    let config = bootstrap::load_config(config_path, args.overrides())?;

    bootstrap::init_logging(&config.logging);
    bootstrap::log_config_summary(config_path, &config);

    info!(version = di::VERSION, "Hostscript starting");

    let shutdown = CancellationToken::new();
    let state = di::build_app_state(&config, shutdown.clone()).await?;

    server::spawn_signal_listener(shutdown);
    server::start_web_server(&config.server, state).await?;

    info!("Hostscript stopped");
    Ok(())
}
