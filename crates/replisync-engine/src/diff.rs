//! Tree diffing: propagate new and changed entries from source to replica

use crate::fingerprint::fingerprint_file;
use crate::journal::CycleJournal;
use replisync_types::{CycleStats, Error, Result, SyncAction};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Top-down differ that makes the replica a superset-matching copy of the
/// source for one pass
///
/// Walks the source tree one directory at a time. Missing replica
/// directories are created eagerly at the parent level so empty source
/// directories still propagate; files are copied when the replica
/// counterpart is missing or its fingerprint differs. A replica entry
/// whose type conflicts with its source counterpart (directory where the
/// source has a file, or the reverse) is removed and replaced, source
/// side winning. Per-entry failures are reported and counted, never
/// fatal to the pass; only directory listing and journal failures abort
/// it.
#[derive(Debug, Default)]
pub struct TreeDiffer;

impl TreeDiffer {
    /// Create a new tree differ
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the source tree into the replica tree, journaling every action
    pub async fn mirror<P: AsRef<Path>>(
        &self,
        source_root: P,
        replica_root: P,
        journal: &mut CycleJournal,
        stats: &mut CycleStats,
    ) -> Result<()> {
        self.sync_dir(source_root.as_ref(), replica_root.as_ref(), journal, stats)
            .await
    }

    /// Synchronize one source directory into its replica counterpart, then
    /// recurse into every subdirectory
    fn sync_dir<'a>(
        &'a self,
        source_dir: &'a Path,
        replica_dir: &'a Path,
        journal: &'a mut CycleJournal,
        stats: &'a mut CycleStats,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + 'a>> {
        Box::pin(async move {
            // Idempotent ensure; only the eager creations below are journaled
            if let Err(e) = fs::create_dir_all(replica_dir).await {
                warn!(
                    "Skipping directory '{}': creation failed: {}",
                    replica_dir.display(),
                    e
                );
                stats.entries_skipped += 1;
                return Ok(());
            }

            let mut files = Vec::new();
            let mut dirs = Vec::new();
            let mut entries = fs::read_dir(source_dir).await.map_err(|e| Error::Io {
                message: format!("Failed to read directory '{}': {}", source_dir.display(), e),
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

            for name in &files {
                let source_file = source_dir.join(name);
                let replica_file = replica_dir.join(name);
                self.sync_file(&source_file, &replica_file, journal, stats)
                    .await?;
            }

            // Eager creation at the parent level so an empty subdirectory
            // present only in source is still created before any descent;
            // a subdirectory whose replica slot could not be prepared is
            // skipped rather than descended into
            let mut descend = Vec::new();
            for name in &dirs {
                let replica_sub = replica_dir.join(name);
                let existing = fs::metadata(&replica_sub).await.ok();

                if existing.as_ref().map_or(false, |m| m.is_dir()) {
                    descend.push(name.clone());
                    continue;
                }

                if existing.is_some() {
                    // A same-named replica file blocks the directory; the
                    // source side wins, so replace it
                    match fs::remove_file(&replica_sub).await {
                        Ok(()) => {
                            journal
                                .record(&SyncAction::RemoveFile {
                                    path: replica_sub.clone(),
                                })
                                .await?;
                            stats.files_removed += 1;
                            debug!("Removed conflicting file: {}", replica_sub.display());
                        }
                        Err(e) => {
                            warn!(
                                "Skipping directory '{}': conflicting replica file could not be removed: {}",
                                replica_sub.display(),
                                e
                            );
                            stats.entries_skipped += 1;
                            continue;
                        }
                    }
                }

                match fs::create_dir_all(&replica_sub).await {
                    Ok(()) => {
                        journal
                            .record(&SyncAction::CreateDirectory {
                                path: replica_sub.clone(),
                            })
                            .await?;
                        stats.directories_created += 1;
                        debug!("Created directory: {}", replica_sub.display());
                        descend.push(name.clone());
                    }
                    Err(e) => {
                        warn!(
                            "Skipping directory '{}': creation failed: {}",
                            replica_sub.display(),
                            e
                        );
                        stats.entries_skipped += 1;
                    }
                }
            }

            for name in &descend {
                let source_sub = source_dir.join(name);
                let replica_sub = replica_dir.join(name);
                self.sync_dir(&source_sub, &replica_sub, journal, stats)
                    .await?;
            }

            Ok(())
        })
    }

    /// Copy one file to the replica when it is missing there or its content
    /// changed; matching fingerprints produce no action and no journal line
    async fn sync_file(
        &self,
        source_file: &Path,
        replica_file: &Path,
        journal: &mut CycleJournal,
        stats: &mut CycleStats,
    ) -> Result<()> {
        let replica_meta = fs::metadata(replica_file).await.ok();

        // A same-named replica directory can never match a source file; the
        // source side wins, so clear it out before comparing anything
        if replica_meta.as_ref().map_or(false, |m| m.is_dir()) {
            match fs::remove_dir_all(replica_file).await {
                Ok(()) => {
                    journal
                        .record(&SyncAction::RemoveDirectory {
                            path: replica_file.to_path_buf(),
                        })
                        .await?;
                    stats.directories_removed += 1;
                    debug!(
                        "Removed conflicting directory: {}",
                        replica_file.display()
                    );
                }
                Err(e) => {
                    warn!(
                        "Skipping file '{}': conflicting replica directory could not be removed: {}",
                        source_file.display(),
                        e
                    );
                    stats.entries_skipped += 1;
                    return Ok(());
                }
            }
        }

        let replica_exists = replica_meta.map_or(false, |m| !m.is_dir());

        let needs_copy = if replica_exists {
            let source_fp = match fingerprint_file(source_file).await {
                Ok(fp) => fp,
                Err(e) => {
                    // Unreadable source: skip this file, report, keep the pass going
                    warn!("Skipping file '{}': {}", source_file.display(), e);
                    stats.entries_skipped += 1;
                    return Ok(());
                }
            };

            // Fail open: an unreadable replica counterpart counts as different
            match fingerprint_file(replica_file).await {
                Ok(replica_fp) => {
                    let changed = source_fp != replica_fp;
                    if changed {
                        debug!(
                            "Fingerprint mismatch for '{}': {} != {}",
                            source_file.display(),
                            source_fp.to_hex(),
                            replica_fp.to_hex()
                        );
                    }
                    changed
                }
                Err(e) => {
                    debug!(
                        "Replica file '{}' unreadable, treating as changed: {}",
                        replica_file.display(),
                        e
                    );
                    true
                }
            }
        } else {
            true
        };

        if !needs_copy {
            return Ok(());
        }

        match self.copy_file(source_file, replica_file).await {
            Ok(bytes) => {
                journal
                    .record(&SyncAction::CopyFile {
                        source: source_file.to_path_buf(),
                        replica: replica_file.to_path_buf(),
                    })
                    .await?;
                stats.files_copied += 1;
                stats.bytes_copied += bytes;
                debug!(
                    "Copied: {} -> {}",
                    source_file.display(),
                    replica_file.display()
                );
            }
            Err(e) => {
                warn!("Skipping file '{}': {}", source_file.display(), e);
                stats.entries_skipped += 1;
            }
        }

        Ok(())
    }

    /// Copy file content and carry over mtime and permissions
    async fn copy_file(&self, source: &Path, replica: &Path) -> Result<u64> {
        let bytes = fs::copy(source, replica).await.map_err(|e| Error::Io {
            message: format!(
                "Failed to copy '{}' to '{}': {}",
                source.display(),
                replica.display(),
                e
            ),
        })?;

        let metadata = fs::metadata(source).await.map_err(|e| Error::Io {
            message: format!("Failed to get metadata for '{}': {}", source.display(), e),
        })?;

        if let Ok(modified) = metadata.modified() {
            filetime::set_file_mtime(replica, filetime::FileTime::from_system_time(modified))
                .map_err(|e| Error::Io {
                    message: format!(
                        "Failed to set modification time for '{}': {}",
                        replica.display(),
                        e
                    ),
                })?;
        }

        fs::set_permissions(replica, metadata.permissions())
            .await
            .map_err(|e| Error::Io {
                message: format!(
                    "Failed to set permissions for '{}': {}",
                    replica.display(),
                    e
                ),
            })?;

        Ok(bytes)
    }
}
