use std::net::IpAddr;

/// One parsed hosts-file line: an address and the hostnames mapped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsRecord {
    pub address: IpAddr,
    pub host: String,
    /// Remaining hostnames of the line, duplicates removed, source order kept.
    pub additional_hosts: Vec<String>,
}

impl HostsRecord {
    pub fn new(address: IpAddr, host: impl Into<String>) -> Self {
        Self {
            address,
            host: host.into(),
            additional_hosts: Vec::new(),
        }
    }

    pub fn with_additional_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Every hostname of the record, primary first.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.host.as_str()).chain(self.additional_hosts.iter().map(String::as_str))
    }

    pub fn hosts_count(&self) -> usize {
        1 + self.additional_hosts.len()
    }
}
