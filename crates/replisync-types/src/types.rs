//! Core data types for replisync
//!
//! The mutating actions a mirror pass can perform and the per-pass
//! statistics accumulated by the scheduler.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A single mutating action performed while mirroring the replica
///
/// Actions are the unit of journaling: every performed action produces
/// exactly one journal line, and unchanged entries produce none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncAction {
    /// A directory present in source was created in the replica
    CreateDirectory {
        /// Replica path of the created directory
        path: PathBuf,
    },
    /// A file was copied from source to replica (new or changed content)
    CopyFile {
        /// Source file path
        source: PathBuf,
        /// Replica file path
        replica: PathBuf,
    },
    /// A stale replica file was removed
    RemoveFile {
        /// Replica path of the removed file
        path: PathBuf,
    },
    /// A stale replica directory was removed with all its descendants
    RemoveDirectory {
        /// Replica path of the removed directory
        path: PathBuf,
    },
}

/// Statistics for one mirror pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of directories created
    pub directories_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of stale files removed
    pub files_removed: u64,
    /// Number of stale directories removed (one per subtree)
    pub directories_removed: u64,
    /// Number of entries skipped because of per-entry errors
    pub entries_skipped: u64,
    /// Total duration of the pass
    pub duration: Duration,
    /// Whether the whole pass was skipped (source root missing)
    pub skipped: bool,
}

impl CycleStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of mutating actions performed during the pass
    pub fn actions(&self) -> u64 {
        self.files_copied + self.directories_created + self.files_removed + self.directories_removed
    }

    /// Whether the pass changed nothing (the trees were already mirrored)
    pub fn is_noop(&self) -> bool {
        !self.skipped && self.actions() == 0
    }

    /// Merge statistics from another pass
    pub fn merge(&mut self, other: &CycleStats) {
        self.files_copied += other.files_copied;
        self.directories_created += other.directories_created;
        self.bytes_copied += other.bytes_copied;
        self.files_removed += other.files_removed;
        self.directories_removed += other.directories_removed;
        self.entries_skipped += other.entries_skipped;
        self.duration += other.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_actions() {
        let mut stats = CycleStats::new();
        stats.files_copied = 2;
        stats.directories_created = 1;
        stats.files_removed = 3;
        stats.directories_removed = 1;

        assert_eq!(stats.actions(), 7);
        assert!(!stats.is_noop());
    }

    #[test]
    fn test_stats_noop() {
        let stats = CycleStats::new();
        assert!(stats.is_noop());

        let skipped = CycleStats {
            skipped: true,
            ..CycleStats::new()
        };
        assert!(!skipped.is_noop());
    }

    #[test]
    fn test_stats_merge() {
        let mut stats1 = CycleStats::new();
        stats1.files_copied = 5;
        stats1.bytes_copied = 1000;

        let mut stats2 = CycleStats::new();
        stats2.files_copied = 3;
        stats2.bytes_copied = 500;
        stats2.entries_skipped = 1;

        stats1.merge(&stats2);
        assert_eq!(stats1.files_copied, 8);
        assert_eq!(stats1.bytes_copied, 1500);
        assert_eq!(stats1.entries_skipped, 1);
    }

    #[test]
    fn test_action_serialization() {
        let action = SyncAction::CopyFile {
            source: PathBuf::from("src/a.txt"),
            replica: PathBuf::from("dst/a.txt"),
        };

        let json = serde_json::to_string(&action).unwrap();
        let decoded: SyncAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, decoded);
    }
}
