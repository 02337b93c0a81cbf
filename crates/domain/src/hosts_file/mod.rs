mod parser;
mod record;

pub use parser::{parse, parse_line, parse_with_stats, ParseStats};
pub use record::HostsRecord;
