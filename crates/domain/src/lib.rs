//! Hostscript Domain Layer
pub mod config;
pub mod errors;
pub mod hosts_file;
pub mod request_params;
pub mod static_entry;
pub mod validators;

pub use config::{CacheEngine, CliOverrides, Config, ConfigError};
pub use errors::{CacheError, DomainError, FetchError, ParameterError};
pub use hosts_file::HostsRecord;
pub use request_params::{RequestParams, FORMAT_ROUTEROS, MAX_EXCLUDED_HOSTS};
pub use static_entry::{render_entries, DnsStaticEntry, RenderOptions};
