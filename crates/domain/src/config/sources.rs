use serde::{Deserialize, Serialize};

/// A well-known hosts-file source offered to users
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SourceConfig {
    pub uri: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Pre-selected in UIs (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Approximate number of records
    #[serde(default)]
    pub count: u64,
}
