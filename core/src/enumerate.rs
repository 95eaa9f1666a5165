//! # Attempt Enumerator
//!
//! Produces the Cartesian product of hosts × credentials as a lazy,
//! host-major sequence. Inputs are sorted sets, so the order is fully
//! determined by the input and the sequence can be re-enumerated at will.

use std::collections::BTreeSet;
use std::net::IpAddr;

use sprayr_common::model::attempt::Attempt;
use sprayr_common::model::credential::Credential;
use sprayr_common::model::service::ServiceKind;

/// Lazily yields `hosts.len() * credentials.len()` attempts, each exactly
/// once. The returned iterator owns its data and carries no shared cursor.
pub fn enumerate(
    hosts: &BTreeSet<IpAddr>,
    credentials: &BTreeSet<Credential>,
    service: ServiceKind,
) -> impl Iterator<Item = Attempt> + Send + 'static {
    let hosts: Vec<IpAddr> = hosts.iter().copied().collect();
    let credentials: Vec<Credential> = credentials.iter().cloned().collect();

    hosts.into_iter().flat_map(move |host| {
        credentials
            .clone()
            .into_iter()
            .map(move |credential| Attempt {
                host,
                credential,
                service,
            })
    })
}

pub fn attempt_count(hosts: &BTreeSet<IpAddr>, credentials: &BTreeSet<Credential>) -> usize {
    hosts.len() * credentials.len()
}
