use crate::dto::VersionResponse;
use crate::state::AppState;
use axum::{extract::State, Json};
use hostscript_application::use_cases::SettingsView;
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_settings")]
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    debug!("Fetching generator settings");
    Json(state.get_settings.execute())
}

pub async fn get_version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.version.to_string(),
    })
}
