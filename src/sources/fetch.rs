//! Fetch strategy trait.

use crate::error::Result;
use std::io::Read;

/// A readable stream of fetched source bytes.
pub type SourceStream = Box<dyn Read + Send>;

/// A way of turning a source location into a byte stream.
///
/// The loader holds an ordered list of strategies and tries each one that
/// [`accepts`](FetchStrategy::accepts) the location until one opens a stream.
/// Implement this trait to plug in other transports.
pub trait FetchStrategy: Send + Sync {
    /// Whether this strategy should be tried for `location`.
    fn accepts(&self, location: &str) -> bool;

    /// Open a stream over the source's bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is malformed or the source cannot be reached.
    fn open(&self, location: &str) -> Result<SourceStream>;

    /// Get a human-readable name for this strategy (for logging/debugging).
    fn name(&self) -> &'static str;
}
