//! # Concurrent Attempt Scheduler
//!
//! Fans attempts out across a bounded worker pool and streams outcomes
//! back in completion order.
//!
//! Invariants:
//! * never more than `workers` probes in flight, even transiently;
//! * every dispatched attempt resolves to exactly one outcome — a probe
//!   that hangs past its timeout becomes `Failure(Timeout)` and its slot
//!   is reclaimed without awaiting the stuck probe any further;
//! * a probe that errors (or panics) fails only its own attempt.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::time::timeout;
use tracing::debug;

use sprayr_common::error::SprayError;
use sprayr_common::model::attempt::{Attempt, AttemptOutcome, FailureReason};

use crate::prober::Prober;

pub struct Scheduler {
    workers: usize,
    attempt_timeout: Duration,
}

impl Scheduler {
    pub fn new(workers: usize, attempt_timeout: Duration) -> Result<Self, SprayError> {
        if workers == 0 {
            return Err(SprayError::InvalidWorkerCount);
        }
        Ok(Self {
            workers,
            attempt_timeout,
        })
    }

    /// Submits every attempt to the pool. Outcomes arrive on the returned
    /// channel as probes complete; the channel closes once all attempts
    /// have resolved, so draining it is the termination condition.
    pub fn dispatch<P>(
        &self,
        attempts: impl IntoIterator<Item = Attempt, IntoIter: Send + 'static>,
        prober: Arc<P>,
    ) -> mpsc::Receiver<AttemptOutcome>
    where
        P: Prober + 'static,
    {
        let (tx, rx) = mpsc::channel(self.workers);
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let attempt_timeout = self.attempt_timeout;
        let attempts = attempts.into_iter();

        tokio::spawn(async move {
            for attempt in attempts {
                // Blocks until a slot frees up: the pool bound doubles as
                // backpressure on enumeration.
                let permit = match Arc::clone(&semaphore).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_closed) => break,
                };

                let tx = tx.clone();
                let prober = Arc::clone(&prober);
                tokio::spawn(async move {
                    let outcome = probe_one(attempt, prober, attempt_timeout).await;
                    drop(permit);
                    let _ = tx.send(outcome).await;
                });
            }
        });

        rx
    }
}

/// Runs a single probe inside its own task so that a panic or a hang is
/// contained to this attempt.
async fn probe_one<P>(attempt: Attempt, prober: Arc<P>, attempt_timeout: Duration) -> AttemptOutcome
where
    P: Prober + 'static,
{
    let host = attempt.host;
    let credential = attempt.credential.clone();

    let mut probe_task = tokio::spawn(async move { prober.probe(&attempt).await });

    match timeout(attempt_timeout, &mut probe_task).await {
        Ok(Ok(Ok(true))) => AttemptOutcome::Success { host, credential },
        Ok(Ok(Ok(false))) => AttemptOutcome::Failure {
            host,
            credential,
            reason: FailureReason::AuthRejected,
        },
        Ok(Ok(Err(err))) => {
            debug!("probe error for {host}: {err:#}");
            AttemptOutcome::Failure {
                host,
                credential,
                reason: FailureReason::ProbeError,
            }
        }
        Ok(Err(join_err)) => {
            debug!("probe task for {host} died: {join_err}");
            AttemptOutcome::Failure {
                host,
                credential,
                reason: FailureReason::ProbeError,
            }
        }
        Err(_elapsed) => {
            probe_task.abort();
            AttemptOutcome::Failure {
                host,
                credential,
                reason: FailureReason::Timeout,
            }
        }
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
