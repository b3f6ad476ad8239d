//! CLI for mr-info.
//!
//! Correlates GitLab merge requests with Jira issues and keeps one comment per
//! merge request up to date on each issue.

use clap::{Parser, ValueEnum};
use mr_info::{Mode, RunSummary, Runner, RunnerError, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// mr-info - Sync GitLab merge request state into Jira comments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// What to run.
    #[arg(value_enum)]
    mode: ModeArg,

    /// Path to the configuration file; defaults to the first `config.toml`
    /// found in /etc/mr-info, $HOME/.mr-info and the working directory.
    #[arg(long, env = "MR_INFO_CONFIG")]
    config: Option<PathBuf>,

    /// Log the comments that would be written without touching Jira.
    #[arg(long)]
    dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    /// Correlate merge requests and write the snapshot file.
    Fetch,
    /// Read the snapshot file and update Jira comments.
    Push,
    /// Fetch and push in one pass, without a snapshot file.
    Connected,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Fetch => Mode::Fetch,
            ModeArg::Push => Mode::Push,
            ModeArg::Connected => Mode::Connected,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let loaded = match Settings::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            init_tracing(false);
            error!(error = %e, "Failed to load configuration");
            return ExitCode::from(1);
        }
    };

    init_tracing(loaded.settings.debug);
    match &loaded.source {
        Some(path) => info!(path = %path.display(), "Using configuration file"),
        None => warn!("No configuration file found, using defaults and environment"),
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    match run(args, loaded.settings, &cancel).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(exit_status(&summary))
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Exit status of a finished run: 2 if any issue or comment failed.
fn exit_status(summary: &RunSummary) -> u8 {
    if summary.has_failures() {
        2
    } else {
        0
    }
}

/// Initializes tracing with environment filter support.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when the
/// `debug` setting is on and `info` when it is not.
fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();
}

/// Cancels `cancel` on the first Ctrl-C.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current request");
            cancel.cancel();
        }
    });
}

/// Main execution logic.
async fn run(
    args: Args,
    settings: Settings,
    cancel: &CancellationToken,
) -> Result<RunSummary, RunnerError> {
    let runner = Runner::new(settings, args.dry_run);
    runner.run(args.mode.into(), cancel).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Projects selected: {}", summary.projects_selected);
    println!(
        "  Merge requests scanned: {}",
        summary.merge_requests_scanned
    );
    println!(
        "  Merge requests correlated: {}",
        summary.merge_requests_correlated
    );
    println!(
        "  Merge requests without issue: {}",
        summary.merge_requests_unmatched
    );
    println!(
        "  Merge requests for other projects: {}",
        summary.merge_requests_ignored
    );
    println!("  Release versions found: {}", summary.release_versions_found);
    println!("  Release URLs missing: {}", summary.release_urls_missing);
    println!("  Issues processed: {}", summary.issues_processed);
    println!("  Issues missing: {}", summary.issues_missing);
    println!("  Issues failed: {}", summary.issues_failed);

    if summary.dry_run {
        println!("  Comments planned: {}", summary.comments_planned);
    } else {
        println!("  Comments created: {}", summary.comments_created);
        println!("  Comments updated: {}", summary.comments_updated);
    }
    println!("  Comments failed: {}", summary.comments_failed);
    println!("  Comments skipped: {}", summary.comments_skipped);
}
