//! Interval scheduler driving repeated mirror passes

use crate::engine::MirrorEngine;
use replisync_types::{CycleStats, Result, SyncInterval};
use tracing::{debug, info, warn};

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next interval to expire
    Idle,
    /// One mirror pass in progress
    Syncing,
}

/// Interval loop that runs one pass, sleeps, and repeats forever
///
/// The first pass runs immediately on startup. A pass that fails or is
/// skipped still transitions back to [`SchedulerState::Idle`] and the
/// loop sleeps and retries on the next interval; there is no terminal
/// state except external process termination. Sleeping uses tokio time,
/// so tests can drive the loop with a paused clock instead of waiting on
/// real intervals.
#[derive(Debug)]
pub struct Scheduler {
    engine: MirrorEngine,
    interval: SyncInterval,
    state: SchedulerState,
    totals: CycleStats,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new(engine: MirrorEngine, interval: SyncInterval) -> Self {
        Self {
            engine,
            interval,
            state: SchedulerState::Idle,
            totals: CycleStats::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Statistics accumulated across all completed passes
    pub fn totals(&self) -> &CycleStats {
        &self.totals
    }

    /// Run exactly one pass
    ///
    /// A missing source root is reported on standard output and yields a
    /// skipped stats object rather than an error; every operation is
    /// attempted exactly once, so persistent faults simply recur on later
    /// passes until resolved externally.
    pub async fn run_once(&mut self) -> Result<CycleStats> {
        self.state = SchedulerState::Syncing;
        let result = self.engine.run_pass().await;
        self.state = SchedulerState::Idle;

        match result {
            Ok(stats) => {
                self.totals.merge(&stats);
                Ok(stats)
            }
            Err(e) if e.skips_pass() => {
                // User-visible diagnostic goes to stdout, never the journal
                println!("Error: {}", e);
                warn!("Pass skipped: {}", e);
                Ok(CycleStats {
                    skipped: true,
                    ..CycleStats::new()
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Run the interval loop forever
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Scheduler started: mirroring '{}' every {}s",
            self.engine.source().display(),
            self.interval.get()
        );

        loop {
            if let Err(e) = self.run_once().await {
                warn!("Mirror pass failed: {}", e);
            }

            debug!("Sleeping for {}s", self.interval.get());
            tokio::time::sleep(self.interval.as_duration()).await;
        }
    }
}
