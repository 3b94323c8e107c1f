//! Configuration types for replisync
//!
//! Validated configuration newtypes, constructed once at startup and
//! passed by value into the engine.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sync interval configuration with validation
///
/// The scheduler sleeps this long between mirror passes. The interval is
/// a whole-second count and must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncInterval(u64);

impl SyncInterval {
    /// Minimum interval (1 second)
    pub const MIN: u64 = 1;
    /// Default interval (60 seconds)
    pub const DEFAULT: u64 = 60;

    /// Create a new sync interval with validation
    pub fn new(seconds: u64) -> Result<Self, String> {
        if seconds < Self::MIN {
            Err(format!(
                "Sync interval {} is below minimum {} second",
                seconds,
                Self::MIN
            ))
        } else {
            Ok(Self(seconds))
        }
    }

    /// Get the interval in whole seconds
    pub fn get(self) -> u64 {
        self.0
    }

    /// Get the interval as a [`Duration`]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for SyncInterval {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_validation() {
        assert!(SyncInterval::new(0).is_err());
        assert!(SyncInterval::new(1).is_ok());
        assert_eq!(SyncInterval::new(30).unwrap().get(), 30);
    }

    #[test]
    fn test_interval_duration() {
        let interval = SyncInterval::new(5).unwrap();
        assert_eq!(interval.as_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_interval_default() {
        assert_eq!(SyncInterval::default().get(), SyncInterval::DEFAULT);
    }
}
