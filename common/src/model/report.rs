//! # Spray Report
//!
//! The final mapping of hosts to the credentials that authenticated
//! against them. Hosts are kept in a sorted map and credentials in sorted
//! sets so that repeated runs over the same input serialize identically,
//! and so that the same success folded twice appears once.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::model::credential::Credential;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub hosts: BTreeMap<IpAddr, BTreeSet<Credential>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful login. Returns `false` when the pair was
    /// already present for that host.
    pub fn record(&mut self, host: IpAddr, credential: Credential) -> bool {
        self.hosts.entry(host).or_default().insert(credential)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Total number of distinct (host, credential) successes.
    pub fn credential_count(&self) -> usize {
        self.hosts.values().map(BTreeSet::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IpAddr, &BTreeSet<Credential>)> {
        self.hosts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn host(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn record_is_idempotent() {
        let mut report = Report::new();
        let cred = Credential::new("alice", "secret1");

        assert!(report.record(host(1), cred.clone()));
        assert!(!report.record(host(1), cred.clone()));

        assert_eq!(report.host_count(), 1);
        assert_eq!(report.credential_count(), 1);
    }

    #[test]
    fn hosts_stay_sorted() {
        let mut report = Report::new();
        report.record(host(9), Credential::new("a", "a"));
        report.record(host(1), Credential::new("a", "a"));
        report.record(host(5), Credential::new("a", "a"));

        let order: Vec<IpAddr> = report.iter().map(|(ip, _)| *ip).collect();
        assert_eq!(order, vec![host(1), host(5), host(9)]);
    }
}
