//! Stale-entry reconciliation: remove replica entries absent from source

use crate::journal::CycleJournal;
use replisync_types::{CycleStats, Error, Result, SyncAction};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Bottom-up reconciler that removes anything the source no longer has
///
/// Walks the replica tree post-order: subdirectories still present in
/// source are visited before anything at the current level is removed, so
/// deletions are journaled deepest-first. A stale subdirectory is removed
/// with all its descendants in one recursive action and is never entered.
#[derive(Debug, Default)]
pub struct StaleReconciler;

impl StaleReconciler {
    /// Create a new reconciler
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove stale replica entries, journaling every removal
    pub async fn reconcile<P: AsRef<Path>>(
        &self,
        source_root: P,
        replica_root: P,
        journal: &mut CycleJournal,
        stats: &mut CycleStats,
    ) -> Result<()> {
        self.reconcile_dir(source_root.as_ref(), replica_root.as_ref(), journal, stats)
            .await
    }

    fn reconcile_dir<'a>(
        &'a self,
        source_dir: &'a Path,
        replica_dir: &'a Path,
        journal: &'a mut CycleJournal,
        stats: &'a mut CycleStats,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + 'a>> {
        Box::pin(async move {
            let mut files = Vec::new();
            let mut dirs = Vec::new();
            let mut entries = fs::read_dir(replica_dir).await.map_err(|e| Error::Io {
                message: format!(
                    "Failed to read directory '{}': {}",
                    replica_dir.display(),
                    e
                ),
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| Error::Io {
                message: format!("Failed to read directory entry: {}", e),
            })? {
                let file_type = entry.file_type().await.map_err(|e| Error::Io {
                    message: format!(
                        "Failed to get file type for '{}': {}",
                        entry.path().display(),
                        e
                    ),
                })?;

                if file_type.is_dir() {
                    dirs.push(entry.file_name());
                } else {
                    files.push(entry.file_name());
                }
            }

            let mut stale_dirs = Vec::new();
            for name in dirs {
                let source_sub = source_dir.join(&name);
                let replica_sub = replica_dir.join(&name);
                if fs::metadata(&source_sub).await.is_ok() {
                    // Still present in source: descend first so deeper
                    // removals are journaled before this level's
                    self.reconcile_dir(&source_sub, &replica_sub, journal, stats)
                        .await?;
                } else {
                    stale_dirs.push(replica_sub);
                }
            }

            for replica_sub in stale_dirs {
                match fs::remove_dir_all(&replica_sub).await {
                    Ok(()) => {
                        journal
                            .record(&SyncAction::RemoveDirectory {
                                path: replica_sub.clone(),
                            })
                            .await?;
                        stats.directories_removed += 1;
                        debug!("Removed directory: {}", replica_sub.display());
                    }
                    Err(e) => {
                        warn!(
                            "Skipping directory '{}': removal failed: {}",
                            replica_sub.display(),
                            e
                        );
                        stats.entries_skipped += 1;
                    }
                }
            }

            for name in files {
                let source_file = source_dir.join(&name);
                let replica_file = replica_dir.join(&name);
                if fs::metadata(&source_file).await.is_ok() {
                    continue;
                }

                match fs::remove_file(&replica_file).await {
                    Ok(()) => {
                        journal
                            .record(&SyncAction::RemoveFile {
                                path: replica_file.clone(),
                            })
                            .await?;
                        stats.files_removed += 1;
                        debug!("Removed file: {}", replica_file.display());
                    }
                    Err(e) => {
                        warn!(
                            "Skipping file '{}': removal failed: {}",
                            replica_file.display(),
                            e
                        );
                        stats.entries_skipped += 1;
                    }
                }
            }

            Ok(())
        })
    }
}
