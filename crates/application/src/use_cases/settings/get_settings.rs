use hostscript_domain::config::SourceConfig;
use hostscript_domain::Config;
use serde::Serialize;

/// Public view of the generator settings, consumed by web UIs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettingsView {
    pub sources: Vec<SourceConfig>,
    pub cache_lifetime_sec: u64,
    pub router_script: ScriptSettingsView,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptSettingsView {
    pub redirect_address: String,
    pub excluded_hosts: Vec<String>,
    pub comment: String,
    pub max_sources: u16,
    pub max_source_size: u64,
}

pub struct GetSettingsUseCase {
    view: SettingsView,
}

impl GetSettingsUseCase {
    pub fn new(config: &Config) -> Self {
        let script = &config.router_script;
        Self {
            view: SettingsView {
                sources: config.sources.clone(),
                cache_lifetime_sec: config.cache.ttl,
                router_script: ScriptSettingsView {
                    redirect_address: script.redirect_address.clone(),
                    excluded_hosts: script.excluded_hosts.clone(),
                    comment: script.comment.clone(),
                    max_sources: script.max_sources,
                    max_source_size: script.max_source_size,
                },
            },
        }
    }

    pub fn execute(&self) -> SettingsView {
        self.view.clone()
    }
}
