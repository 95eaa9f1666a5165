//! # Result Aggregator
//!
//! Folds the scheduler's outcome stream into the final [`Report`].
//! Consumes outcomes as they arrive, so memory stays bounded by the
//! successes found, never by the number of attempts made.

use tokio::sync::mpsc::Receiver;
use tracing::trace;

use sprayr_common::model::attempt::{AttemptOutcome, FailureReason};
use sprayr_common::model::report::Report;

/// Per-run counters, kept for the closing summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub successes: usize,
    pub rejected: usize,
    pub timeouts: usize,
    pub errors: usize,
}

impl RunStats {
    pub fn total(&self) -> usize {
        self.successes + self.rejected + self.timeouts + self.errors
    }
}

/// Drains the outcome channel, retaining successes with set semantics and
/// counting failures by reason. Returns once the scheduler has resolved
/// every attempt and closed the channel.
pub async fn fold(
    mut outcomes: Receiver<AttemptOutcome>,
    mut on_outcome: impl FnMut(&AttemptOutcome),
) -> (Report, RunStats) {
    let mut report = Report::new();
    let mut stats = RunStats::default();

    while let Some(outcome) = outcomes.recv().await {
        on_outcome(&outcome);

        match &outcome {
            AttemptOutcome::Success { host, credential } => {
                stats.successes += 1;
                if !report.record(*host, credential.clone()) {
                    trace!("duplicate success for {host} folded away");
                }
            }
            AttemptOutcome::Failure { reason, .. } => match reason {
                FailureReason::AuthRejected => stats.rejected += 1,
                FailureReason::Timeout => stats.timeouts += 1,
                FailureReason::ProbeError => stats.errors += 1,
            },
        }
    }

    (report, stats)
}
