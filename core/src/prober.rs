//! The boundary between the scheduling engine and the protocol handshakes.
//!
//! The scheduler only ever sees [`Prober`]; tests inject stubs through the
//! same trait, and [`ServiceProber`] is the production implementation that
//! dispatches each attempt to the handshake for its service kind.

use std::time::Duration;

use async_trait::async_trait;

use sprayr_common::config::SprayConfig;
use sprayr_common::model::attempt::Attempt;
use sprayr_common::model::service::ServiceKind;

/// Performs exactly one connection + authentication try.
///
/// `Ok(true)` means the credential was accepted, `Ok(false)` that the
/// service rejected it, `Err` that the service could not be probed. The
/// scheduler additionally bounds every call with its own timeout.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, attempt: &Attempt) -> anyhow::Result<bool>;
}

/// Production prober: SSH via libssh2, FTP via the control channel.
pub struct ServiceProber {
    port: Option<u16>,
    timeout: Duration,
}

impl ServiceProber {
    pub fn new(config: &SprayConfig) -> Self {
        Self {
            port: config.port,
            timeout: config.attempt_timeout,
        }
    }
}

#[async_trait]
impl Prober for ServiceProber {
    async fn probe(&self, attempt: &Attempt) -> anyhow::Result<bool> {
        let port = self.port.unwrap_or_else(|| attempt.service.default_port());

        match attempt.service {
            ServiceKind::Ssh => {
                sprayr_protocols::ssh::try_login(attempt.host, port, &attempt.credential, self.timeout)
                    .await
            }
            ServiceKind::Ftp => {
                sprayr_protocols::ftp::try_login(attempt.host, port, &attempt.credential, self.timeout)
                    .await
            }
        }
    }
}
