use crate::state::AppState;
use axum::extract::{RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use hostscript_domain::DomainError;
use tracing::{error, instrument, warn};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

fn plain(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

/// `GET /script/source`: render a RouterOS script from the requested sources.
///
/// Failures are reported as `## ` comments so the body stays a valid script.
#[instrument(skip(state, query), name = "api_generate_script")]
pub async fn generate_script(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    // Dropped with this future when the client goes away.
    let request_token = state.shutdown.child_token();
    let _guard = request_token.clone().drop_guard();

    let query = query.unwrap_or_default();

    match state.generate_script.execute(&query, &request_token).await {
        Ok(script) => plain(StatusCode::OK, script.body),
        Err(e @ DomainError::InvalidParameters(_)) => {
            warn!(error = %e, "Rejected script request");
            plain(StatusCode::BAD_REQUEST, format!("## {e}\n"))
        }
        Err(e) => {
            error!(error = %e, "Script generation failed");
            plain(StatusCode::INTERNAL_SERVER_ERROR, format!("## {e}\n"))
        }
    }
}
