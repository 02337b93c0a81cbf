use crate::errors::ParameterError;
use crate::validators::normalize_source_url;
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::num::NonZeroU32;

/// The only script format the generator emits.
pub const FORMAT_ROUTEROS: &str = "routeros";

pub const MAX_EXCLUDED_HOSTS: usize = 32;

const PARAM_SOURCES: &str = "sources_urls";
const PARAM_FORMAT: &str = "format";
const PARAM_VERSION: &str = "version";
const PARAM_EXCLUDED: &str = "excluded_hosts";
const PARAM_LIMIT: &str = "limit";
const PARAM_REDIRECT: &str = "redirect_to";

/// Validated script generation parameters. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// Deduplicated, sorted source URLs.
    pub sources: Vec<String>,
    pub format: String,
    pub version: Option<String>,
    /// Deduplicated, sorted hostnames that must never be emitted.
    pub excluded_hosts: Vec<String>,
    pub limit: Option<NonZeroU32>,
    pub redirect_to: IpAddr,
}

impl RequestParams {
    /// Build parameters from a raw query string such as
    /// `sources_urls=https://a/hosts,https://b/hosts&limit=100`.
    pub fn from_query_string(
        query: &str,
        default_redirect: IpAddr,
        max_sources: usize,
    ) -> Result<Self, ParameterError> {
        Self::from_pairs(
            url::form_urlencoded::parse(query.as_bytes()),
            default_redirect,
            max_sources,
        )
    }

    /// Build parameters from decoded `(name, value)` pairs. Repeated names are
    /// merged; list parameters are also split on commas.
    pub fn from_pairs<I, K, V>(
        pairs: I,
        default_redirect: IpAddr,
        max_sources: usize,
    ) -> Result<Self, ParameterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut sources: Option<BTreeSet<String>> = None;
        let mut excluded = BTreeSet::new();
        let mut format: Option<String> = None;
        let mut version: Option<String> = None;
        let mut limit: Option<String> = None;
        let mut redirect: Option<String> = None;

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                PARAM_SOURCES => {
                    let set = sources.get_or_insert_with(BTreeSet::new);
                    set.extend(value.split(',').filter_map(normalize_source_url));
                }
                PARAM_EXCLUDED => {
                    excluded.extend(
                        value
                            .split(',')
                            .map(|h| h.trim_matches([' ', '\'', '"', '\n', '\r']))
                            .filter(|h| !h.is_empty())
                            .map(str::to_string),
                    );
                }
                PARAM_FORMAT => {
                    format.get_or_insert_with(|| value.to_string());
                }
                PARAM_VERSION => {
                    version.get_or_insert_with(|| value.to_string());
                }
                PARAM_LIMIT => {
                    limit.get_or_insert_with(|| value.to_string());
                }
                PARAM_REDIRECT => {
                    redirect.get_or_insert_with(|| value.to_string());
                }
                _ => {}
            }
        }

        let sources = sources.ok_or(ParameterError::MissingSources)?;

        let limit = match limit {
            None => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<NonZeroU32>()
                    .map_err(|_| ParameterError::InvalidLimit)?,
            ),
        };

        let redirect_to = match redirect {
            None => default_redirect,
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ParameterError::InvalidRedirect)?,
        };

        let params = Self {
            sources: sources.into_iter().collect(),
            format: format.unwrap_or_else(|| FORMAT_ROUTEROS.to_string()),
            version,
            excluded_hosts: excluded.into_iter().collect(),
            limit,
            redirect_to,
        };

        params.validate(max_sources)?;

        Ok(params)
    }

    pub fn validate(&self, max_sources: usize) -> Result<(), ParameterError> {
        if self.sources.is_empty() {
            return Err(ParameterError::EmptySources);
        }
        if self.sources.len() > max_sources {
            return Err(ParameterError::TooManySources(max_sources));
        }
        if self.excluded_hosts.len() > MAX_EXCLUDED_HOSTS {
            return Err(ParameterError::TooManyExcludedHosts(MAX_EXCLUDED_HOSTS));
        }
        if self.format != FORMAT_ROUTEROS {
            return Err(ParameterError::UnsupportedFormat(self.format.clone()));
        }
        Ok(())
    }

    pub fn is_excluded(&self, host: &str) -> bool {
        self.excluded_hosts
            .binary_search_by(|h| h.as_str().cmp(host))
            .is_ok()
    }

    /// The configured limit, `0` meaning unlimited.
    pub fn limit_value(&self) -> u32 {
        self.limit.map_or(0, NonZeroU32::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const REDIRECT: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

    fn parse(query: &str) -> Result<RequestParams, ParameterError> {
        RequestParams::from_query_string(query, REDIRECT, 5)
    }

    #[test]
    fn sources_are_deduplicated_and_sorted() {
        let params = parse(
            "sources_urls=https://b.example/hosts,https://a.example/hosts\
             &sources_urls=https://b.example/hosts,bad-url",
        )
        .unwrap();

        assert_eq!(
            params.sources,
            ["https://a.example/hosts", "https://b.example/hosts"]
        );
    }

    #[test]
    fn defaults_are_applied() {
        let params = parse("sources_urls=https://a.example/hosts").unwrap();

        assert_eq!(params.format, FORMAT_ROUTEROS);
        assert_eq!(params.version, None);
        assert!(params.excluded_hosts.is_empty());
        assert_eq!(params.limit, None);
        assert_eq!(params.limit_value(), 0);
        assert_eq!(params.redirect_to, REDIRECT);
    }

    #[test]
    fn optional_values_are_parsed() {
        let params = parse(
            "sources_urls=https://a.example/hosts&format=routeros&version=v1\
             &excluded_hosts=%27foo.com%27,bar.com&excluded_hosts=foo.com\
             &limit=50&redirect_to=0.0.0.0",
        )
        .unwrap();

        assert_eq!(params.version.as_deref(), Some("v1"));
        assert_eq!(params.excluded_hosts, ["bar.com", "foo.com"]);
        assert!(params.is_excluded("foo.com"));
        assert!(!params.is_excluded("baz.com"));
        assert_eq!(params.limit_value(), 50);
        assert_eq!(params.redirect_to, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn missing_sources_is_rejected() {
        assert_eq!(parse("limit=5"), Err(ParameterError::MissingSources));
    }

    #[test]
    fn empty_sources_is_rejected() {
        assert_eq!(parse("sources_urls=foo,bar"), Err(ParameterError::EmptySources));
    }

    #[test]
    fn too_many_sources_is_rejected() {
        let urls: Vec<String> = (0..6).map(|i| format!("https://s{i}.example/hosts")).collect();
        let query = format!("sources_urls={}", urls.join(","));

        assert_eq!(parse(&query), Err(ParameterError::TooManySources(5)));
    }

    #[test]
    fn too_many_excluded_hosts_is_rejected() {
        let hosts: Vec<String> = (0..33).map(|i| format!("h{i}.example")).collect();
        let query = format!(
            "sources_urls=https://a.example/hosts&excluded_hosts={}",
            hosts.join(",")
        );

        assert_eq!(
            parse(&query),
            Err(ParameterError::TooManyExcludedHosts(MAX_EXCLUDED_HOSTS))
        );
    }

    #[test]
    fn invalid_limit_is_rejected() {
        for limit in ["0", "-1", "abc", ""] {
            let query = format!("sources_urls=https://a.example/hosts&limit={limit}");
            assert_eq!(parse(&query), Err(ParameterError::InvalidLimit), "limit={limit}");
        }
    }

    #[test]
    fn invalid_redirect_is_rejected() {
        assert_eq!(
            parse("sources_urls=https://a.example/hosts&redirect_to=999.1.1.1"),
            Err(ParameterError::InvalidRedirect)
        );
    }

    #[test]
    fn unsupported_format_is_rejected() {
        assert_eq!(
            parse("sources_urls=https://a.example/hosts&format=dnsmasq"),
            Err(ParameterError::UnsupportedFormat("dnsmasq".to_string()))
        );
    }
}
