use super::source::SourceOutcome;
use hostscript_domain::validators::contains_illegal_symbols;
use hostscript_domain::{DnsStaticEntry, RequestParams};
use std::collections::HashSet;
use std::net::IpAddr;

/// Deduplicated, bounded and sorted hostnames gathered from all sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Sorted ascending.
    pub hostnames: Vec<String>,
    /// Hostnames seen across every successful source, before filtering.
    pub discovered: usize,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.hostnames.is_empty()
    }

    pub fn ignored(&self) -> usize {
        self.discovered.saturating_sub(self.hostnames.len())
    }

    /// One static entry per hostname, in hostname order.
    pub fn to_entries(&self, redirect_to: IpAddr, comment: &str) -> Vec<DnsStaticEntry> {
        let address = redirect_to.to_string();
        self.hostnames
            .iter()
            .map(|name| DnsStaticEntry::new(address.clone(), name.clone()).with_comment(comment))
            .collect()
    }
}

/// Reduce source outcomes into a single hostname set.
///
/// Sources are scanned in the given order. Excluded hostnames and hostnames
/// carrying `"` or `\` are dropped; scanning stops once `limit` hostnames are
/// kept. Must only run after every source task has completed.
pub fn aggregate(params: &RequestParams, outcomes: &[SourceOutcome]) -> Aggregation {
    let discovered: usize = outcomes
        .iter()
        .filter(|o| o.is_ok())
        .map(SourceOutcome::hostnames_count)
        .sum();

    let limit = match params.limit_value() {
        0 => usize::MAX,
        n => n as usize,
    };
    let capacity = discovered.min(limit);
    let mut seen: HashSet<&str> = HashSet::with_capacity(capacity);

    'sources: for outcome in outcomes.iter().filter(|o| o.is_ok()) {
        for record in &outcome.records {
            for name in record.hosts() {
                if seen.len() >= limit {
                    break 'sources;
                }
                if contains_illegal_symbols(name) || params.is_excluded(name) {
                    continue;
                }
                seen.insert(name);
            }
        }
    }

    let mut hostnames: Vec<String> = seen.into_iter().map(str::to_string).collect();
    hostnames.sort_unstable();

    Aggregation {
        hostnames,
        discovered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::script::CacheStatus;
    use hostscript_domain::HostsRecord;
    use std::net::Ipv4Addr;
    use std::num::NonZeroU32;

    fn params(limit: u32, excluded: &[&str]) -> RequestParams {
        RequestParams {
            sources: vec!["https://a.example/hosts".to_string()],
            format: "routeros".to_string(),
            version: None,
            excluded_hosts: excluded.iter().map(|s| s.to_string()).collect(),
            limit: NonZeroU32::new(limit),
            redirect_to: IpAddr::V4(Ipv4Addr::LOCALHOST),
        }
    }

    fn outcome(url: &str, hosts: &[&str]) -> SourceOutcome {
        SourceOutcome {
            url: url.to_string(),
            records: hosts
                .iter()
                .map(|h| HostsRecord::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), *h))
                .collect(),
            cache: CacheStatus::Miss,
            error: None,
        }
    }

    #[test]
    fn merges_and_sorts_hostnames() {
        let outcomes = [outcome("a", &["x", "y", "z"]), outcome("b", &["z", "w"])];

        let result = aggregate(&params(0, &[]), &outcomes);

        assert_eq!(result.hostnames, ["w", "x", "y", "z"]);
        assert_eq!(result.discovered, 5);
        assert_eq!(result.ignored(), 1);
    }

    #[test]
    fn excluded_and_illegal_hostnames_are_dropped() {
        let outcomes = [
            outcome("a", &["keep.com", "drop.com", "bad\"name"]),
            outcome("b", &["drop.com", r"back\slash"]),
        ];

        let result = aggregate(&params(0, &["drop.com"]), &outcomes);

        assert_eq!(result.hostnames, ["keep.com"]);
    }

    #[test]
    fn limit_bounds_the_set() {
        let outcomes = [outcome("a", &["a.com", "b.com", "c.com"])];

        let result = aggregate(&params(2, &[]), &outcomes);

        assert_eq!(result.hostnames.len(), 2);
        assert_eq!(result.hostnames, ["a.com", "b.com"]);
    }

    #[test]
    fn additional_hosts_are_included() {
        let mut source = outcome("a", &[]);
        source.records.push(
            HostsRecord::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), "one.com")
                .with_additional_hosts(["two.com", "three.com"]),
        );

        let result = aggregate(&params(0, &[]), &[source]);

        assert_eq!(result.hostnames, ["one.com", "three.com", "two.com"]);
    }

    #[test]
    fn failed_sources_contribute_nothing() {
        let mut failed = outcome("b", &["ghost.com"]);
        failed.error = Some(hostscript_domain::DomainError::SourceParse("boom".into()));

        let result = aggregate(&params(0, &[]), &[outcome("a", &["real.com"]), failed]);

        assert_eq!(result.hostnames, ["real.com"]);
    }

    #[test]
    fn entries_carry_redirect_and_comment() {
        let result = aggregate(&params(0, &[]), &[outcome("a", &["b.com", "a.com"])]);

        let entries = result.to_entries(IpAddr::V4(Ipv4Addr::UNSPECIFIED), "ADBlock");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.com");
        assert_eq!(entries[0].address, "0.0.0.0");
        assert_eq!(entries[0].comment, "ADBlock");
        assert_eq!(entries[1].name, "b.com");
    }
}
