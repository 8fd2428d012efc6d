//! Error types for OctoFit

use thiserror::Error;

/// Main error type for OctoFit operations
#[derive(Error, Debug)]
pub enum OctofitError {
    /// Configuration errors (missing host, unreadable or invalid config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetch or parse failure for an API collection.
    ///
    /// The message is shown verbatim in the view's error alert, so it carries
    /// no prefix of its own.
    #[error("{0}")]
    Fetch(String),
}

/// Result type alias for OctoFit operations
pub type Result<T> = std::result::Result<T, OctofitError>;
