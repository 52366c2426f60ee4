//! Run-level error types.
//!
//! Only fatal conditions live here. Anything recoverable per table, column or
//! file is pushed to the run's [`Warnings`](crate::Warnings) instead.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// Errors that abort a generation run.
#[derive(Debug)]
pub enum Error {
    /// Configuration failed validation; nothing was introspected or written.
    Config(ConfigError),
    /// The table metadata source could not supply metadata.
    Metadata(String),
    /// Every alternate file name `<name>.1` .. `<name>.999` is taken.
    UniqueFileName { directory: PathBuf },
    /// The caller asked the run to stop.
    Cancelled,
}

impl Error {
    /// Create a metadata-source error.
    pub fn metadata(message: impl Into<String>) -> Self {
        Error::Metadata(message.into())
    }

    /// Whether this error is the cancellation signal rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "invalid configuration: {}", err),
            Error::Metadata(msg) => write!(f, "table metadata unavailable: {}", msg),
            Error::UniqueFileName { directory } => write!(
                f,
                "cannot find a unique file name in directory {}",
                directory.display()
            ),
            Error::Cancelled => write!(f, "generation cancelled"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if let Error::Config(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

/// Every problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// One message per problem, in discovery order.
    pub errors: Vec<String>,
}

impl ConfigError {
    /// Wrap a single problem.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl StdError for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::single(format!("malformed configuration document: {}", err))
    }
}

/// Result type alias for fatal run errors.
pub type Result<T> = std::result::Result<T, Error>;
