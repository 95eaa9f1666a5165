use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::info;

use sprayr_common::config::SprayConfig;
use sprayr_common::model::attempt::AttemptOutcome;
use sprayr_common::model::report::Report;
use sprayr_common::wordlist;
use sprayr_core::{RunStats, Scheduler, ServiceProber, run_spray};

use crate::commands::RunArgs;
use crate::terminal::{print, progress};

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = SprayConfig {
        service: args.service,
        port: args.port,
        workers: args.workers,
        attempt_timeout: Duration::from_secs(args.timeout),
    };

    // Configuration problems abort here, before any file or socket is touched.
    let scheduler = Scheduler::new(config.workers, config.attempt_timeout)?;

    print::header("loading target sets");
    let hosts = wordlist::load_hosts(&args.rhosts)?;
    let credentials = wordlist::load_credentials(&args.credentials)?;

    info!(
        "{} hosts parsed from {} ({} lines skipped)",
        hosts.hosts.len(),
        args.rhosts.display(),
        hosts.skipped
    );
    info!(
        "{} credential pairs parsed from {} ({} lines skipped)",
        credentials.credentials.len(),
        args.credentials.display(),
        credentials.skipped
    );

    let total = sprayr_core::enumerate::attempt_count(&hosts.hosts, &credentials.credentials);

    print::header("spraying");
    info!(
        "{} attempts against {} port {} with {} workers, {}s timeout",
        total,
        config.service,
        config.port(),
        config.workers,
        args.timeout
    );

    let prober = Arc::new(ServiceProber::new(&config));
    let bar = progress::attempt_bar(total as u64);
    let started = Instant::now();

    let (report, stats) = run_spray(
        &hosts.hosts,
        &credentials.credentials,
        config.service,
        &scheduler,
        prober,
        |outcome| {
            bar.inc(1);
            if let AttemptOutcome::Success { host, credential } = outcome {
                bar.suspend(|| info!("{} accepted {}", host, credential.to_string().bold()));
            }
        },
    )
    .await;

    bar.finish_and_clear();

    print::header("results");
    print_report(&report, &stats, started.elapsed());

    // The report was already shown; a failing write must not swallow it.
    write_report(&report, &args.output)
}

fn print_report(report: &Report, stats: &RunStats, elapsed: Duration) {
    if report.is_empty() {
        print::no_results();
    } else {
        for (idx, (host, credentials)) in report.iter().enumerate() {
            print::tree_head(idx, &host.to_string());
            let leaves: Vec<String> = credentials
                .iter()
                .map(|cred| format!("{} / {}", cred.username, cred.password))
                .collect();
            print::as_tree_one_level(&leaves);
        }
    }

    let successes: ColoredString = format!("{} successes", stats.successes).bold().green();
    let elapsed: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    let summary: ColoredString = format!(
        "{successes}, {} rejected, {} timeouts, {} errors in {elapsed}",
        stats.rejected, stats.timeouts, stats.errors
    )
    .normal();

    print::fat_separator();
    print::centerln(&summary);
}

fn write_report(report: &Report, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    info!("report written to {}", path.display());
    Ok(())
}
