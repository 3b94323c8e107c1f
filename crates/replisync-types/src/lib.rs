//! Core type system and error handling for replisync
//!
//! This crate provides the foundational types shared across the replisync
//! workspace:
//!
//! - **Error handling**: structured error types with kind classification
//! - **Sync actions**: the mutating operations a mirror pass can perform
//! - **Statistics**: per-pass counters with merge support
//! - **Configuration**: validated configuration newtypes
//!
//! # Examples
//!
//! ```rust
//! use replisync_types::{CycleStats, Result};
//!
//! fn example_pass() -> Result<CycleStats> {
//!     let mut stats = CycleStats::new();
//!     stats.files_copied = 3;
//!     stats.bytes_copied = 4096;
//!     Ok(stats)
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use config::SyncInterval;
pub use error::{Error, ErrorKind};
pub use result::Result;
pub use types::{CycleStats, SyncAction};
