//! The spraying engine: enumerate attempts, fan them out across a bounded
//! worker pool, and fold the completions into a deduplicated report.

pub mod aggregate;
pub mod enumerate;
pub mod prober;
pub mod scheduler;

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;

pub use aggregate::RunStats;
pub use prober::{Prober, ServiceProber};
pub use scheduler::Scheduler;

use sprayr_common::model::attempt::AttemptOutcome;
use sprayr_common::model::credential::Credential;
use sprayr_common::model::report::Report;
use sprayr_common::model::service::ServiceKind;

/// Executes a full spray run: every credential against every host.
///
/// `on_outcome` is invoked once per attempt as outcomes arrive, in
/// completion order; use it for progress reporting.
pub async fn run_spray<P>(
    hosts: &BTreeSet<IpAddr>,
    credentials: &BTreeSet<Credential>,
    service: ServiceKind,
    scheduler: &Scheduler,
    prober: Arc<P>,
    on_outcome: impl FnMut(&AttemptOutcome),
) -> (Report, RunStats)
where
    P: Prober + 'static,
{
    let attempts = enumerate::enumerate(hosts, credentials, service);
    let outcomes = scheduler.dispatch(attempts, prober);
    aggregate::fold(outcomes, on_outcome).await
}
