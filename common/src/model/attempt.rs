use std::fmt;
use std::net::IpAddr;

use crate::model::credential::Credential;
use crate::model::service::ServiceKind;

/// One (host, credential, service) triple to be probed exactly once.
/// Immutable; its identity is the triple itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attempt {
    pub host: IpAddr,
    pub credential: Credential,
    pub service: ServiceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The service answered and refused the credential.
    AuthRejected,
    /// The attempt exceeded its wall-clock bound.
    Timeout,
    /// Connecting or speaking the handshake failed.
    ProbeError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureReason::AuthRejected => "rejected",
            FailureReason::Timeout => "timeout",
            FailureReason::ProbeError => "probe error",
        };
        f.write_str(label)
    }
}

/// Produced exactly once per [`Attempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success {
        host: IpAddr,
        credential: Credential,
    },
    Failure {
        host: IpAddr,
        credential: Credential,
        reason: FailureReason,
    },
}

impl AttemptOutcome {
    pub fn host(&self) -> IpAddr {
        match self {
            AttemptOutcome::Success { host, .. } | AttemptOutcome::Failure { host, .. } => *host,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }
}
