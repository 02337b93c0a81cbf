use crate::handlers;
use crate::middleware::no_cache;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

/// Creates all HTTP routes with state
pub fn create_routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/settings", get(handlers::get_settings))
        .route("/version", get(handlers::get_version))
        .layer(middleware::from_fn(no_cache));

    Router::new()
        .route("/script/source", get(handlers::generate_script))
        .route("/live", get(handlers::liveness))
        .route("/ready", get(handlers::readiness))
        .nest("/api", api)
        .with_state(state)
}
