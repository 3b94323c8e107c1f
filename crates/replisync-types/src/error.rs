//! Error types and handling for replisync
//!
//! Mirrors the taxonomy a long-running mirroring service needs: I/O faults
//! on individual entries, journal write failures, configuration problems,
//! and a missing source root, which skips a pass rather than failing it.

use std::path::PathBuf;

/// Main error type for replisync operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Source root directory is missing or not a directory
    #[error("Source folder not found: {path}")]
    SourceMissing {
        /// Path that was expected to be the source root
        path: PathBuf,
    },

    /// Journal file could not be opened or written
    #[error("Journal error: {message}")]
    Journal {
        /// Error message describing the journal failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Missing source root
    SourceMissing,
    /// Journal failures
    Journal,
    /// Configuration errors
    Config,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::SourceMissing { .. } => ErrorKind::SourceMissing,
            Self::Journal { .. } => ErrorKind::Journal,
            Self::Config { .. } => ErrorKind::Config,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Whether the scheduler should keep looping after this error.
    ///
    /// A missing source only skips the current pass; everything else is
    /// reported but the interval loop continues as well, since persistent
    /// faults simply recur on the next pass until resolved externally.
    pub fn skips_pass(&self) -> bool {
        matches!(self, Self::SourceMissing { .. })
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a new journal error
    pub fn journal<S: Into<String>>(message: S) -> Self {
        Self::Journal {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test file");
        let error = Error::from(io_error);

        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("test file"));
        assert!(!error.skips_pass());
    }

    #[test]
    fn test_source_missing_error() {
        let path = PathBuf::from("/nonexistent/source");
        let error = Error::SourceMissing { path: path.clone() };

        assert_eq!(error.kind(), ErrorKind::SourceMissing);
        assert!(error.skips_pass());
        assert!(error.to_string().contains("/nonexistent/source"));
    }

    #[test]
    fn test_journal_error() {
        let error = Error::journal("permission denied");

        assert_eq!(error.kind(), ErrorKind::Journal);
        assert!(!error.skips_pass());
        assert!(error.to_string().contains("permission denied"));
    }

    #[test]
    fn test_config_error() {
        let error = Error::config("interval must be positive");

        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.to_string().contains("interval must be positive"));
    }

    #[test]
    fn test_other_error() {
        let error = Error::other("something else");
        assert_eq!(error.kind(), ErrorKind::Other);
    }
}
