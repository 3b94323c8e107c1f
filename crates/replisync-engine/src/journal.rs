//! Append-only journal of mirror pass actions
//!
//! The journal is the user-facing record of what each pass did, distinct
//! from diagnostic tracing. It is opened fresh for every pass and dropped
//! when the pass ends, so no handle outlives the interval loop iteration.

use replisync_types::{Error, Result, SyncAction};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Journal for one mirror pass, opened in append mode
///
/// Lines are written in action order between a start and a finish marker.
/// Unchanged entries write nothing, so a no-op pass contributes exactly
/// two lines. History accumulates across passes and process restarts.
#[derive(Debug)]
pub struct CycleJournal {
    file: File,
}

impl CycleJournal {
    /// Open the journal file, creating it if needed
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| Error::Journal {
                message: format!("Failed to open journal '{}': {}", path.display(), e),
            })?;

        debug!("Opened journal at '{}'", path.display());
        Ok(Self { file })
    }

    /// Write the pass start marker
    pub async fn start(&mut self) -> Result<()> {
        self.write_line(&format!("Syncing started at {}", timestamp()))
            .await
    }

    /// Write one line for a performed action
    pub async fn record(&mut self, action: &SyncAction) -> Result<()> {
        self.write_line(&action_line(action)).await
    }

    /// Write the pass finish marker and flush
    pub async fn finish(&mut self) -> Result<()> {
        self.write_line(&format!("Syncing finished at {}", timestamp()))
            .await?;
        self.file.flush().await.map_err(|e| Error::Journal {
            message: format!("Failed to flush journal: {}", e),
        })
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        let mut buf = line.as_bytes().to_vec();
        buf.push(b'\n');
        self.file
            .write_all(&buf)
            .await
            .map_err(|e| Error::Journal {
                message: format!("Failed to write journal entry: {}", e),
            })
    }
}

/// Render the journal line for an action
fn action_line(action: &SyncAction) -> String {
    match action {
        SyncAction::CopyFile { source, replica } => {
            format!("Copied {} to {}", source.display(), replica.display())
        }
        SyncAction::CreateDirectory { path } => {
            format!("Created directory {}", path.display())
        }
        SyncAction::RemoveDirectory { path } => {
            format!("Removed directory {}", path.display())
        }
        SyncAction::RemoveFile { path } => {
            format!("Removed file {}", path.display())
        }
    }
}

/// Human-readable local timestamp, ctime style
fn timestamp() -> String {
    chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}
