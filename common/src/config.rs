use std::time::Duration;

use crate::model::service::ServiceKind;

pub const DEFAULT_WORKERS: usize = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REPORT_PATH: &str = "sprayr-report.json";

/// Tunables for a single spray run.
#[derive(Debug, Clone)]
pub struct SprayConfig {
    pub service: ServiceKind,
    /// Overrides the service default port when set.
    ///
    /// Does not change which handshake is spoken.
    pub port: Option<u16>,
    /// Ceiling on concurrent in-flight login attempts.
    pub workers: usize,
    /// Wall-clock bound for one attempt, connect included.
    pub attempt_timeout: Duration,
}

impl SprayConfig {
    pub fn new(service: ServiceKind) -> Self {
        Self {
            service,
            port: None,
            workers: DEFAULT_WORKERS,
            attempt_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.service.default_port())
    }
}
