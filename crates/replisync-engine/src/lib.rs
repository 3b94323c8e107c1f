//! One-way directory mirroring engine for replisync
//!
//! This crate makes a replica directory tree exactly match a source tree,
//! repeatedly on a fixed interval, journaling every mutating action:
//!
//! - **Content Fingerprinting**: BLAKE3 digests over full file content decide
//!   whether two files are identical, independent of timestamps
//! - **Tree Diffing**: a top-down walk of the source creates missing replica
//!   directories and copies new or changed files
//! - **Stale-Entry Reconciliation**: a bottom-up walk of the replica removes
//!   anything the source no longer has, whole subtrees in a single action
//! - **Cycle Journaling**: an append-only, human-readable journal records one
//!   line per action between per-pass start/finish markers
//! - **Scheduling**: an interval loop runs one pass, sleeps, and repeats
//!
//! # Examples
//!
//! ```rust,no_run
//! use replisync_engine::{MirrorEngine, Scheduler};
//! use replisync_types::SyncInterval;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = MirrorEngine::new("source_dir", "replica_dir", "sync.log");
//! let interval = SyncInterval::new(30)?;
//! let mut scheduler = Scheduler::new(engine, interval);
//! scheduler.run().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod diff;
pub mod engine;
pub mod fingerprint;
pub mod journal;
pub mod reconcile;
pub mod scheduler;

pub use diff::TreeDiffer;
pub use engine::MirrorEngine;
pub use fingerprint::{fingerprint_file, Fingerprint};
pub use journal::CycleJournal;
pub use reconcile::StaleReconciler;
pub use scheduler::{Scheduler, SchedulerState};
