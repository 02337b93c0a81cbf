use serde::{Deserialize, Serialize};

/// Script generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterScriptConfig {
    /// Address blocked hostnames resolve to when the request does not set one
    /// (default: "127.0.0.1")
    #[serde(default = "default_redirect_address")]
    pub redirect_address: String,

    /// Comment attached to every generated entry (default: "ADBlock")
    #[serde(default = "default_comment")]
    pub comment: String,

    /// Maximum number of sources per request (default: 10)
    #[serde(default = "default_max_sources")]
    pub max_sources: u16,

    /// Maximum accepted size of a single source in bytes (default: 2 MiB)
    #[serde(default = "default_max_source_size")]
    pub max_source_size: u64,

    /// Hostnames suggested for exclusion by UIs
    #[serde(default = "default_excluded_hosts")]
    pub excluded_hosts: Vec<String>,
}

impl Default for RouterScriptConfig {
    fn default() -> Self {
        Self {
            redirect_address: default_redirect_address(),
            comment: default_comment(),
            max_sources: default_max_sources(),
            max_source_size: default_max_source_size(),
            excluded_hosts: default_excluded_hosts(),
        }
    }
}

fn default_redirect_address() -> String {
    "127.0.0.1".to_string()
}

fn default_comment() -> String {
    "ADBlock".to_string()
}

fn default_max_sources() -> u16 {
    10
}

fn default_max_source_size() -> u64 {
    2 * 1024 * 1024
}

fn default_excluded_hosts() -> Vec<String> {
    vec!["localhost".to_string()]
}
