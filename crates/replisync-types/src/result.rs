//! Result type alias for replisync operations

use crate::Error;

/// Result type alias for replisync operations
pub type Result<T> = std::result::Result<T, Error>;
