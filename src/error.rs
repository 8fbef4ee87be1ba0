//! Error types for cached-props.

use std::io;
use std::path::PathBuf;

/// Result type alias for cached-props operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while fetching, caching, or applying properties.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The source location could not be interpreted.
    #[error("Invalid source location '{location}': {reason}")]
    InvalidLocation {
        /// The location as given in the source spec
        location: String,
        /// Why it was rejected
        reason: String,
    },

    /// The source was reachable but did not yield a usable stream.
    #[error("Failed to open source '{location}': {reason}")]
    FetchError {
        /// The location as given in the source spec
        location: String,
        /// Why the fetch failed
        reason: String,
    },

    /// HTTP transport failure.
    #[cfg(feature = "remote")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing or promoting a cache snapshot failed.
    #[error("Failed to write cache file {}: {source}", path.display())]
    CacheWrite {
        /// The cache file being written or replaced
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The stable cache snapshot is missing or unreadable.
    #[error("Failed to read cache file {}: {source}", path.display())]
    CacheRead {
        /// The stable cache file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Attempted to use a feature that is not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(&'static str),

    /// Loader settings could not be assembled.
    #[error("Failed to load settings: {0}")]
    SettingsError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// What the pipeline does with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Log it and carry on; the source contributes nothing from this step.
    Recoverable,
    /// Resource exhaustion; must propagate to the host.
    Fatal,
}

impl ConfigError {
    /// Classify this error.
    ///
    /// Only resource exhaustion is fatal. Panics are never caught by the
    /// loader, so termination conditions propagate without passing through here.
    pub fn disposition(&self) -> Disposition {
        match self.io_source() {
            Some(err) if err.kind() == io::ErrorKind::OutOfMemory => Disposition::Fatal,
            _ => Disposition::Recoverable,
        }
    }

    /// Returns true if this error must not be swallowed.
    pub fn is_fatal(&self) -> bool {
        self.disposition() == Disposition::Fatal
    }

    fn io_source(&self) -> Option<&io::Error> {
        match self {
            Self::CacheWrite { source, .. } | Self::CacheRead { source, .. } => Some(source),
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

/// Split the result of a fallible step by disposition.
///
/// Fatal errors come back in the outer `Err` so `?` carries them to the host.
/// Recoverable ones come back as the inner `Err` for the caller to log.
///
/// # Examples
///
/// ```rust
/// use cached_props::error::{triage, ConfigError, Result};
///
/// fn step() -> Result<u32> {
///     Err(ConfigError::FeatureNotEnabled("remote"))
/// }
///
/// # fn main() -> Result<()> {
/// match triage(step())? {
///     Ok(value) => println!("got {value}"),
///     Err(err) => println!("recovered: {err}"),
/// }
/// # Ok(())
/// # }
/// ```
pub fn triage<T>(result: Result<T>) -> Result<std::result::Result<T, ConfigError>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => Ok(Err(err)),
    }
}
