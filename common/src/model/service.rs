//! # Service Model
//!
//! The closed set of services a spray run can authenticate against.
//! Anything outside this set is rejected while the command line is parsed,
//! long before a socket is opened.

use std::fmt;
use std::str::FromStr;

use crate::error::SprayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Ssh,
    Ftp,
}

impl ServiceKind {
    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Ssh => 22,
            ServiceKind::Ftp => 21,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Ssh => "ssh",
            ServiceKind::Ftp => "ftp",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = SprayError;

    /// Parses a service name, case-insensitively ("ssh", "FTP", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ssh" => Ok(ServiceKind::Ssh),
            "ftp" => Ok(ServiceKind::Ftp),
            _ => Err(SprayError::UnknownService(s.to_string())),
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
