use hostscript_api::{create_routes, AppState};
use hostscript_domain::config::ServerConfig;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Serve HTTP until the shutdown token is cancelled, then close the cache.
#[allow(deprecated)]
pub async fn start_web_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let bind_addr = config.bind_address();
    let shutdown = state.shutdown.clone();
    let cacher = state.cacher.clone();

    let app = create_routes(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(address = %listener.local_addr()?, "HTTP server listening");

    let token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await?;

    info!("HTTP server stopped");

    if let Err(e) = cacher.close().await {
        error!(error = %e, "Cache closing failed");
    }

    Ok(())
}

/// Cancel `shutdown` on Ctrl-C or SIGTERM.
pub fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Ctrl-C received, shutting down"),
            _ = terminate => info!("SIGTERM received, shutting down"),
        }

        shutdown.cancel();
    });
}
