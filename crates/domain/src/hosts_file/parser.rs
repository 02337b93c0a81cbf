use super::record::HostsRecord;
use crate::errors::DomainError;
use crate::validators::is_valid_hostname;
use std::io::BufRead;
use std::net::IpAddr;
use tracing::trace;

/// Lines this short cannot hold an address and a hostname.
const MIN_LINE_LEN: usize = 6;

/// Outcome of a full parse, including how many lines were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: Vec<HostsRecord>,
    pub rejected_lines: usize,
}

enum LineOutcome {
    Record(HostsRecord),
    Skipped,
    Rejected,
}

/// Parse a hosts-file stream. Record order follows the source.
///
/// Malformed lines are dropped; only a read failure on `input` is an error.
pub fn parse<R: BufRead>(input: R) -> Result<Vec<HostsRecord>, DomainError> {
    parse_with_stats(input).map(|stats| stats.records)
}

/// Same as [`parse`], also counting the lines that were rejected.
pub fn parse_with_stats<R: BufRead>(mut input: R) -> Result<ParseStats, DomainError> {
    let mut stats = ParseStats::default();
    let mut buf = Vec::with_capacity(256);
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .map_err(|e| DomainError::SourceParse(e.to_string()))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        match classify_line(line.trim_end_matches(['\n', '\r'])) {
            LineOutcome::Record(record) => stats.records.push(record),
            LineOutcome::Skipped => {}
            LineOutcome::Rejected => {
                stats.rejected_lines += 1;
                trace!(line = line_no, "Hosts file line rejected");
            }
        }
    }

    Ok(stats)
}

/// Parse a single hosts-file line.
///
/// Supported shapes:
/// - blank, short or `# comment` lines      → None
/// - `0.0.0.0 ads.example.com`              → one hostname
/// - `::1 localhost ip6-localhost`          → primary + additional hostnames
/// - `127.0.0.1 a.com b.com # trailing`     → comment truncates the line
pub fn parse_line(line: &str) -> Option<HostsRecord> {
    match classify_line(line) {
        LineOutcome::Record(record) => Some(record),
        LineOutcome::Skipped | LineOutcome::Rejected => None,
    }
}

fn classify_line(line: &str) -> LineOutcome {
    if line.len() < MIN_LINE_LEN || line.starts_with('#') {
        return LineOutcome::Skipped;
    }

    let mut words = line.split([' ', '\t']).filter(|w| !w.is_empty());

    let address = match words.next() {
        None => return LineOutcome::Skipped,
        Some(first) if first.starts_with('#') => return LineOutcome::Skipped,
        Some(first) => match first.parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(_) => return LineOutcome::Rejected,
        },
    };

    let mut hostnames: Vec<&str> = Vec::with_capacity(3);
    for word in words {
        if word.starts_with('#') {
            break;
        }
        if is_valid_hostname(word) && !hostnames.contains(&word) {
            hostnames.push(word);
        }
    }

    let mut hostnames = hostnames.into_iter();
    match hostnames.next() {
        Some(host) => LineOutcome::Record(
            HostsRecord::new(address, host).with_additional_hosts(hostnames),
        ),
        None => LineOutcome::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use std::net::{Ipv4Addr, Ipv6Addr};

    const SAMPLE: &str = "\
# Comment line
127.0.0.1 localhost
::1 localhost ip6-localhost ip6-loopback

0.0.0.0 ads.example.com\t tracker.example.com # inline comment ignored.example.com
0.0.0.0 dup.example.com dup.example.com other.example.com
not-an-ip bad.example.com
0.0.0.0 bad_host!.com
  # indented comment
1.2.3 short.example.com
";

    #[test]
    fn parses_sample_in_source_order() {
        let records = parse(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0], HostsRecord::new(Ipv4Addr::LOCALHOST.into(), "localhost"));
        assert_eq!(
            records[1],
            HostsRecord::new(Ipv6Addr::LOCALHOST.into(), "localhost")
                .with_additional_hosts(["ip6-localhost", "ip6-loopback"])
        );
        assert_eq!(
            records[2],
            HostsRecord::new(Ipv4Addr::UNSPECIFIED.into(), "ads.example.com")
                .with_additional_hosts(["tracker.example.com"])
        );
        assert_eq!(
            records[3],
            HostsRecord::new(Ipv4Addr::UNSPECIFIED.into(), "dup.example.com")
                .with_additional_hosts(["other.example.com"])
        );
    }

    #[test]
    fn counts_rejected_lines() {
        let stats = parse_with_stats(Cursor::new(SAMPLE)).unwrap();

        assert_eq!(stats.records.len(), 4);
        // not-an-ip, hostname-less address, truncated address
        assert_eq!(stats.rejected_lines, 3);
    }

    #[test]
    fn parsing_is_deterministic() {
        let first = parse(Cursor::new(SAMPLE)).unwrap();
        let second = parse(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let records = parse(Cursor::new("0.0.0.0 a.example.com\r\n0.0.0.0 b.example.com\r\n")).unwrap();
        let hosts: Vec<_> = records.iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts, ["a.example.com", "b.example.com"]);
    }

    #[test]
    fn last_line_without_newline_is_parsed() {
        let records = parse(Cursor::new("0.0.0.0 a.example.com")).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn parse_line_skips_comments_and_short_lines() {
        assert!(parse_line("# 0.0.0.0 a.example.com").is_none());
        assert!(parse_line("1 a").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("0.0.0.0 #a.example.com").is_none());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"))
        }
    }

    #[test]
    fn read_failure_is_propagated() {
        let result = parse(io::BufReader::new(FailingReader));
        assert!(matches!(result, Err(DomainError::SourceParse(_))));
    }
}
