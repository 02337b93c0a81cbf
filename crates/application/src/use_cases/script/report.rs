use super::aggregate::Aggregation;
use super::source::{CacheStatus, SourceOutcome};
use hostscript_domain::{render_entries, DnsStaticEntry, DomainError, RenderOptions, RequestParams};
use std::io::{self, Write};
use std::time::Duration;

const ENTRY_PREFIX: &str = "add";
const SCRIPT_SECTION: &str = "/ip dns static";

/// Everything needed to write a generated script.
pub struct ScriptReport<'a> {
    pub generated_at: String,
    pub generator_version: &'a str,
    pub cache_lifetime: Duration,
    pub params: &'a RequestParams,
    pub outcomes: &'a [SourceOutcome],
    pub aggregation: &'a Aggregation,
    pub entries: &'a [DnsStaticEntry],
}

/// Round to whole seconds and format as `1h2m3s` / `4m5s` / `6s`.
pub fn format_duration(d: Duration) -> String {
    let secs = (d.as_millis() + 500) / 1000;
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn write_comment<W: Write>(out: &mut W, comment: &str) -> io::Result<()> {
    writeln!(out, "## {comment}")
}

/// Write the processing comments followed by the entry block.
///
/// Returns the number of entries written. A failure while rendering entries
/// is reported as a trailing comment; failures writing comments propagate.
pub fn write_script<W: Write>(out: &mut W, report: &ScriptReport<'_>) -> io::Result<usize> {
    let params = report.params;

    write_comment(out, &format!("Script generated at {}", report.generated_at))?;
    write_comment(out, &format!("Generator version: {}", report.generator_version))?;
    write_comment(out, &format!("Limit: {}", params.limit_value()))?;
    write_comment(
        out,
        &format!("Cache lifetime: {}", format_duration(report.cache_lifetime)),
    )?;
    write_comment(out, &format!("Format: {}", params.format))?;
    write_comment(out, &format!("Redirect to: {}", params.redirect_to))?;
    write_comment(out, "Sources list:")?;
    for url in &params.sources {
        write_comment(out, &format!(" - <{url}>"))?;
    }

    if !params.excluded_hosts.is_empty() {
        write_comment(out, "Excluded hosts:")?;
        for host in &params.excluded_hosts {
            write_comment(out, &format!(" - {host}"))?;
        }
    }

    for outcome in report.outcomes {
        if let Some(err) = &outcome.error {
            write_comment(out, &format!("Source <{}> error: {}", outcome.url, err))?;
            continue;
        }

        match outcome.cache {
            CacheStatus::Hit { ttl } => write_comment(
                out,
                &format!(
                    "Cache HIT for <{}> (expires after {})",
                    outcome.url,
                    format_duration(ttl)
                ),
            )?,
            CacheStatus::Miss => write_comment(out, &format!("Cache miss for <{}>", outcome.url))?,
        }
    }

    if report.entries.is_empty() {
        write_comment(out, &DomainError::EmptyHostsList.to_string())?;
        return Ok(0);
    }

    write!(out, "\n{SCRIPT_SECTION}\n")?;
    let render_result = render_entries(
        report.entries,
        out,
        &RenderOptions::with_prefix(ENTRY_PREFIX),
    );
    out.write_all(b"\n\n")?;

    if let Err(e) = render_result {
        write_comment(out, &format!("Script rendering error: {e}"))?;
    }

    write_comment(
        out,
        &format!(
            "Records count: {} ({} records ignored)",
            report.entries.len(),
            report.aggregation.ignored()
        ),
    )?;

    Ok(report.entries.len())
}
