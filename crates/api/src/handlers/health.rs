use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{debug, warn};

pub async fn liveness() -> &'static str {
    debug!("Liveness check requested");
    "OK"
}

/// Ready once the cache engine answers.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, String) {
    if state.shutdown.is_cancelled() {
        return (StatusCode::SERVICE_UNAVAILABLE, "shutting down".to_string());
    }

    match state.cacher.ping().await {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}
