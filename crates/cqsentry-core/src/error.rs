//! Error types for cqsentry

use thiserror::Error;

/// Main error type for cqsentry operations.
///
/// `ConfigLoad` and `Construction` are fatal to a scan: the runner stops at
/// the first one instead of continuing with the remaining checks, so callers
/// can tell "the scanner could not run" apart from "the scanner found
/// vulnerabilities".
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing configuration for a check could not be read or parsed
    #[error("failed to load configuration for check '{check}': {message}")]
    ConfigLoad { check: String, message: String },

    /// A check factory failed to produce a runnable check
    #[error("failed to construct check '{check}': {message}")]
    Construction { check: String, message: String },

    /// A check hit a condition it could not classify as an outcome
    #[error("check '{check}' could not be evaluated: {message}")]
    Execution { check: String, message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Fatal configuration load failure for the named check
    pub fn config_load(check: impl Into<String>, message: impl ToString) -> Self {
        Error::ConfigLoad {
            check: check.into(),
            message: message.to_string(),
        }
    }

    /// Fatal construction failure for the named check
    pub fn construction(check: impl Into<String>, message: impl ToString) -> Self {
        Error::Construction {
            check: check.into(),
            message: message.to_string(),
        }
    }

    /// Fatal evaluation failure inside the named check
    pub fn execution(check: impl Into<String>, message: impl ToString) -> Self {
        Error::Execution {
            check: check.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias for cqsentry operations
pub type Result<T> = std::result::Result<T, Error>;
