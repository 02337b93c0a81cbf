mod aggregate;
mod generate;
mod report;
mod source;

pub use aggregate::{aggregate, Aggregation};
pub use generate::{GenerateScriptUseCase, GeneratedScript, ScriptSettings};
pub use report::{format_duration, write_script, ScriptReport};
pub use source::{process_source, CacheStatus, SourceOutcome};
