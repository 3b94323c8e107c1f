//! replisync - interval-driven one-way directory mirroring
//!
//! Keeps a replica directory identical to a source directory, re-checking
//! on a fixed interval and journaling every copy, create, and removal.

use anyhow::{anyhow, Result};
use clap::Parser;
use console::style;
use replisync_engine::{MirrorEngine, Scheduler};
use replisync_types::SyncInterval;
use std::path::PathBuf;
use tracing::info;

/// replisync - interval-driven one-way directory mirroring
#[derive(Parser)]
#[command(
    name = "replisync",
    version = env!("CARGO_PKG_VERSION"),
    about = "One-way directory mirroring on a fixed interval",
    long_about = "replisync makes REPLICA an exact mirror of SOURCE, repeating the\n\
                  comparison every INTERVAL seconds. Every copy, directory creation,\n\
                  and removal is appended to LOG_FILE; unchanged files produce no\n\
                  journal lines."
)]
struct Cli {
    /// Source root: the authoritative tree being mirrored from
    source: PathBuf,

    /// Replica root: the tree kept in sync with the source
    replica: PathBuf,

    /// Journal file path (append-only, survives restarts)
    log_file: PathBuf,

    /// Sync interval in whole seconds
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.quiet, cli.verbose)?;

    info!("replisync v{} starting", env!("CARGO_PKG_VERSION"));

    let interval = SyncInterval::new(cli.interval).map_err(|e| anyhow!(e))?;

    if !cli.quiet {
        println!(
            "{} Mirroring {} into {} every {}s (journal: {})",
            style("⟲").blue().bold(),
            style(cli.source.display()).cyan(),
            style(cli.replica.display()).cyan(),
            style(interval.get()).green(),
            style(cli.log_file.display()).cyan()
        );
    }

    let engine = MirrorEngine::new(&cli.source, &cli.replica, &cli.log_file);
    let mut scheduler = Scheduler::new(engine, interval);

    // Loops until the process is terminated externally
    scheduler.run().await?;
    Ok(())
}

fn init_logging(debug: bool, quiet: bool, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap();

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}
