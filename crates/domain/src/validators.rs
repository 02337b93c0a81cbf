use url::Url;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const MAX_URL_LEN: usize = 2048;

/// Check a hostname against the DNS label syntax accepted in hosts files.
///
/// Labels may carry `_` (service records, `_dmarc.example.com`) but the last
/// label must start with an alphanumeric character and contain only
/// alphanumerics and `-`.
pub fn is_valid_hostname(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    let mut labels = name.split('.').peekable();

    while let Some(label) = labels.next() {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }

        let is_last = labels.peek().is_none();

        if is_last {
            let mut bytes = label.bytes();
            match bytes.next() {
                Some(first) if first.is_ascii_alphanumeric() => {}
                _ => return false,
            }
            if !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-') {
                return false;
            }
        } else if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return false;
        }
    }

    true
}

/// Characters the RouterOS script format cannot carry unescaped.
pub fn contains_illegal_symbols(s: &str) -> bool {
    s.contains('"') || s.contains('\\')
}

/// Parse and normalise a source URL. Only absolute `http(s)` URLs are accepted.
pub fn normalize_source_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_URL_LEN {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url.to_string()),
        _ => None,
    }
}
