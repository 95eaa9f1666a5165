use thiserror::Error;

/// Configuration errors that must abort the run before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SprayError {
    #[error("unknown service '{0}', expected \"ssh\" or \"ftp\"")]
    UnknownService(String),

    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
}
