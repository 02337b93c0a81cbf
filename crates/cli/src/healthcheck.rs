use anyhow::{bail, Context};
use std::time::Duration;

const LIVENESS_PATH: &str = "/live";

/// Ask a running server whether it is alive.
///
/// Succeeds only on a `2xx` answer from `/live`. Meant for container
/// `HEALTHCHECK` directives, so the process exit code carries the result.
pub async fn check_liveness(base_url: &str, timeout: Duration) -> anyhow::Result<()> {
    let url = format!("{}{LIVENESS_PATH}", base_url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Liveness request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Liveness check at {url} answered {status}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn healthy_server_passes() {
        let base = spawn(Router::new().route("/live", get(|| async { "OK" }))).await;

        assert!(check_liveness(&format!("{base}/"), Duration::from_secs(2))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn error_status_fails() {
        let base = spawn(Router::new().route(
            "/live",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let err = check_liveness(&base, Duration::from_secs(2))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("503"), "{err}");
    }

    #[tokio::test]
    async fn unreachable_server_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = check_liveness(&format!("http://{addr}"), Duration::from_secs(2)).await;

        assert!(result.is_err());
    }
}
