use hostscript_application::ports::Cacher;
use hostscript_application::use_cases::{GenerateScriptUseCase, GetSettingsUseCase};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub generate_script: Arc<GenerateScriptUseCase>,
    pub get_settings: Arc<GetSettingsUseCase>,
    pub cacher: Arc<dyn Cacher>,
    /// Cancelled on process shutdown; every request derives a child token.
    pub shutdown: CancellationToken,
    pub version: Arc<str>,
}
