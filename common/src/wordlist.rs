//! # Target Set Builder
//!
//! Turns raw host and credential lines into validated, deduplicated sets.
//!
//! Bad input is never fatal here: a line that does not parse is skipped
//! with a warning and counted, and the run continues with whatever was
//! valid. Only a file that cannot be read at all aborts the run.

use std::collections::BTreeSet;
use std::fs;
use std::net::IpAddr;
use std::path::Path;

use anyhow::Context;
use tracing::warn;

use crate::model::credential::Credential;

/// Validated hosts plus the number of input lines that were dropped.
#[derive(Debug, Clone, Default)]
pub struct HostSet {
    pub hosts: BTreeSet<IpAddr>,
    pub skipped: usize,
}

/// Validated credential pairs plus the number of input lines dropped.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    pub credentials: BTreeSet<Credential>,
    pub skipped: usize,
}

/// Parses one IP literal per line. Lines that are blank or not a valid
/// IPv4/IPv6 address are skipped with a warning.
pub fn parse_hosts<'a>(lines: impl IntoIterator<Item = &'a str>) -> HostSet {
    let mut set = HostSet::default();

    for line in lines {
        let line = line.trim();
        match line.parse::<IpAddr>() {
            Ok(ip) => {
                set.hosts.insert(ip);
            }
            Err(_) => {
                warn!("not a valid ip address, skipping: '{line}'");
                set.skipped += 1;
            }
        }
    }

    set
}

/// Parses one `username password` pair per line, split on whitespace.
/// Lines with any other field count are skipped with a warning.
pub fn parse_credentials<'a>(lines: impl IntoIterator<Item = &'a str>) -> CredentialSet {
    let mut set = CredentialSet::default();

    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [username, password] => {
                set.credentials.insert(Credential::new(*username, *password));
            }
            _ => {
                warn!(
                    "expected two whitespace-separated fields, got {}, skipping: '{}'",
                    fields.len(),
                    line.trim()
                );
                set.skipped += 1;
            }
        }
    }

    set
}

pub fn load_hosts(path: &Path) -> anyhow::Result<HostSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read host file {}", path.display()))?;
    Ok(parse_hosts(content.lines()))
}

pub fn load_credentials(path: &Path) -> anyhow::Result<CredentialSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read credential file {}", path.display()))?;
    Ok(parse_credentials(content.lines()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
