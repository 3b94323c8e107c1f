//! One mirror pass: diff, reconcile, journal

use crate::diff::TreeDiffer;
use crate::journal::CycleJournal;
use crate::reconcile::StaleReconciler;
use replisync_types::{CycleStats, Error, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{info, warn};

/// Engine that executes complete mirror passes
///
/// A pass recomputes everything from a live filesystem walk; nothing is
/// cached between passes, so correctness never depends on stale state.
/// The journal is opened at pass start and dropped at pass end.
#[derive(Debug)]
pub struct MirrorEngine {
    source: PathBuf,
    replica: PathBuf,
    journal_path: PathBuf,
    differ: TreeDiffer,
    reconciler: StaleReconciler,
}

impl MirrorEngine {
    /// Create a new mirror engine for the given roots and journal path
    pub fn new<P: AsRef<Path>>(source: P, replica: P, journal_path: P) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            replica: replica.as_ref().to_path_buf(),
            journal_path: journal_path.as_ref().to_path_buf(),
            differ: TreeDiffer::new(),
            reconciler: StaleReconciler::new(),
        }
    }

    /// Source root path
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Replica root path
    pub fn replica(&self) -> &Path {
        &self.replica
    }

    /// Run one full mirror pass
    ///
    /// A missing source root returns [`Error::SourceMissing`] before the
    /// journal is touched, so a skipped pass leaves no journal lines at
    /// all, not even start/finish markers. The replica root is created
    /// automatically when absent.
    pub async fn run_pass(&self) -> Result<CycleStats> {
        let start_time = Instant::now();

        match fs::metadata(&self.source).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => {
                return Err(Error::SourceMissing {
                    path: self.source.clone(),
                });
            }
        }

        fs::create_dir_all(&self.replica).await.map_err(|e| Error::Io {
            message: format!(
                "Failed to create replica root '{}': {}",
                self.replica.display(),
                e
            ),
        })?;

        info!(
            "Starting mirror pass: {} -> {}",
            self.source.display(),
            self.replica.display()
        );

        let mut journal = CycleJournal::open(&self.journal_path).await?;
        let mut stats = CycleStats::new();

        journal.start().await?;
        self.differ
            .mirror(&self.source, &self.replica, &mut journal, &mut stats)
            .await?;
        self.reconciler
            .reconcile(&self.source, &self.replica, &mut journal, &mut stats)
            .await?;
        journal.finish().await?;

        stats.duration = start_time.elapsed();

        if stats.entries_skipped > 0 {
            warn!("Mirror pass skipped {} entries", stats.entries_skipped);
        }
        info!(
            "Mirror pass completed: {} actions, {} bytes in {:?}",
            stats.actions(),
            stats.bytes_copied,
            stats.duration
        );

        Ok(stats)
    }
}
