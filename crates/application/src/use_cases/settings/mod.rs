mod get_settings;

pub use get_settings::{GetSettingsUseCase, ScriptSettingsView, SettingsView};
