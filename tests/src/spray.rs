//! End-to-end runs of the spraying engine against stub probers: from raw
//! input lines through enumeration, scheduling and aggregation to the
//! serialized report.

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use sprayr_common::model::attempt::Attempt;
use sprayr_common::model::credential::Credential;
use sprayr_common::model::report::Report;
use sprayr_common::model::service::ServiceKind;
use sprayr_common::wordlist;
use sprayr_core::{Prober, Scheduler, run_spray};

/// Accepts exactly one (host, username, password) triple, counts every call.
struct SingleAccount {
    host: IpAddr,
    credential: Credential,
    probes: AtomicUsize,
}

impl SingleAccount {
    fn new(host: IpAddr, credential: Credential) -> Self {
        Self {
            host,
            credential,
            probes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Prober for SingleAccount {
    async fn probe(&self, attempt: &Attempt) -> anyhow::Result<bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(attempt.host == self.host && attempt.credential == self.credential)
    }
}

/// Never answers; every attempt must resolve through the timeout.
struct Unresponsive {
    probes: AtomicUsize,
}

#[async_trait]
impl Prober for Unresponsive {
    async fn probe(&self, _attempt: &Attempt) -> anyhow::Result<bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        unreachable!()
    }
}

fn scheduler(workers: usize, timeout_ms: u64) -> Scheduler {
    Scheduler::new(workers, Duration::from_millis(timeout_ms)).unwrap()
}

#[tokio::test]
async fn mixed_input_reports_only_the_valid_login() {
    let hosts = wordlist::parse_hosts(["10.0.0.1", "bad-ip"]);
    let credentials = wordlist::parse_credentials(["alice secret1", "bob pw"]);

    assert_eq!(hosts.hosts.len(), 1);
    assert_eq!(hosts.skipped, 1);
    assert_eq!(credentials.credentials.len(), 2);

    let target = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let valid = Credential::new("alice", "secret1");
    let prober = Arc::new(SingleAccount::new(target, valid.clone()));

    let (report, stats) = run_spray(
        &hosts.hosts,
        &credentials.credentials,
        ServiceKind::Ssh,
        &scheduler(4, 1_000),
        Arc::clone(&prober),
        |_| {},
    )
    .await;

    assert_eq!(prober.probes.load(Ordering::SeqCst), 2);
    assert_eq!(stats.successes, 1);
    assert_eq!(stats.rejected, 1);

    let mut expected = Report::new();
    expected.record(target, valid);
    assert_eq!(report, expected);
}

#[tokio::test]
async fn empty_credential_file_probes_nothing() {
    let hosts = wordlist::parse_hosts(["10.0.0.1", "10.0.0.2"]);
    let credentials = wordlist::parse_credentials(std::iter::empty::<&str>());

    let prober = Arc::new(SingleAccount::new(
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
        Credential::new("alice", "secret1"),
    ));

    let (report, stats) = run_spray(
        &hosts.hosts,
        &credentials.credentials,
        ServiceKind::Ftp,
        &scheduler(4, 1_000),
        Arc::clone(&prober),
        |_| {},
    )
    .await;

    assert_eq!(prober.probes.load(Ordering::SeqCst), 0);
    assert!(report.is_empty());
    assert_eq!(stats.total(), 0);
}

#[tokio::test]
async fn unresponsive_targets_still_terminate() {
    let hosts = wordlist::parse_hosts(["10.0.0.1", "10.0.0.2"]);
    let credentials = wordlist::parse_credentials(["root toor", "admin admin"]);

    let prober = Arc::new(Unresponsive {
        probes: AtomicUsize::new(0),
    });

    // 4 attempts over 4 workers with a 50ms timeout: well under 5s.
    let sched = scheduler(4, 50);
    let run = run_spray(
        &hosts.hosts,
        &credentials.credentials,
        ServiceKind::Ssh,
        &sched,
        Arc::clone(&prober),
        |_| {},
    );
    let (report, stats) = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run must terminate even when every probe hangs");

    assert!(report.is_empty());
    assert_eq!(stats.timeouts, 4);
    assert_eq!(prober.probes.load(Ordering::SeqCst), 4);
}

#[test]
fn unknown_service_is_rejected_before_any_run() {
    assert!("telnet".parse::<ServiceKind>().is_err());
}

#[tokio::test]
async fn outcomes_stream_in_completion_order_not_submission_order() {
    /// Fast for one host, slow for the rest.
    struct SlowFirstHost;

    #[async_trait]
    impl Prober for SlowFirstHost {
        async fn probe(&self, attempt: &Attempt) -> anyhow::Result<bool> {
            if attempt.host == IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)) {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            Ok(true)
        }
    }

    let hosts: BTreeSet<IpAddr> = ["10.0.0.1", "10.0.0.2"]
        .iter()
        .map(|ip| ip.parse().unwrap())
        .collect();
    let credentials: BTreeSet<Credential> = [Credential::new("root", "toor")].into_iter().collect();

    let mut order: Vec<IpAddr> = Vec::new();
    let (_, stats) = run_spray(
        &hosts,
        &credentials,
        ServiceKind::Ssh,
        &scheduler(2, 1_000),
        Arc::new(SlowFirstHost),
        |outcome| order.push(outcome.host()),
    )
    .await;

    assert_eq!(stats.successes, 2);
    // The slow host was enumerated first but completes last.
    assert_eq!(order[0], IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)));
}

mod report_emission {
    use super::*;
    use std::io::Write;

    #[test]
    fn report_round_trips_through_json() {
        let mut report = Report::new();
        report.record(
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            Credential::new("alice", "secret1"),
        );

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("10.0.0.1"));
        assert!(json.contains("\"username\": \"alice\""));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn empty_report_is_well_formed() {
        let json = serde_json::to_string(&Report::new()).unwrap();
        assert_eq!(json, r#"{"hosts":{}}"#);
    }

    #[test]
    fn report_file_written_and_read_back() {
        let mut report = Report::new();
        report.record(
            IpAddr::V4(Ipv4Addr::new(192, 168, 0, 7)),
            Credential::new("ftpuser", "hunter2"),
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&report).unwrap().as_bytes())
            .unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Report = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.credential_count(), 1);
    }
}
