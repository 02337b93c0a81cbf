pub mod script;
pub mod settings;

// Re-export use cases
pub use script::{GenerateScriptUseCase, GeneratedScript, ScriptSettings};
pub use settings::{GetSettingsUseCase, SettingsView};
