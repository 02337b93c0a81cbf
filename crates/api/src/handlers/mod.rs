pub mod health;
pub mod script;
pub mod settings;

pub use health::{liveness, readiness};
pub use script::generate_script;
pub use settings::{get_settings, get_version};
