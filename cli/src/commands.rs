pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sprayr_common::config::{DEFAULT_REPORT_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use sprayr_common::model::service::ServiceKind;

#[derive(Parser)]
#[command(name = "sprayr")]
#[command(about = "A credential sprayer for SSH and FTP services.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Try every credential pair against every target host
    #[command(alias = "r")]
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// File with one target IP address per line
    #[arg(long)]
    pub rhosts: PathBuf,

    /// File with one space-separated "username password" pair per line
    #[arg(long)]
    pub credentials: PathBuf,

    /// Service to authenticate against: "ssh" or "ftp" (case-insensitive)
    #[arg(long)]
    pub service: ServiceKind,

    /// Maximum number of concurrent login attempts
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-attempt timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Override the service default port (22 for ssh, 21 for ftp)
    #[arg(long)]
    pub port: Option<u16>,

    /// Where to write the JSON report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub output: PathBuf,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
