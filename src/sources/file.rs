//! Bare filesystem path strategy.

use super::{FetchStrategy, SourceStream};
use crate::error::Result;
use std::fs::File;

/// Opens the location string as a local filesystem path.
///
/// Accepts every location, so it serves as the last tier after scheme-based
/// opening has been tried or skipped.
///
/// # Examples
///
/// ```rust,no_run
/// use cached_props::sources::{FetchStrategy, PathFetcher};
///
/// let stream = PathFetcher.open("/etc/app/system.properties");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PathFetcher;

impl FetchStrategy for PathFetcher {
    fn accepts(&self, _location: &str) -> bool {
        true
    }

    fn open(&self, location: &str) -> Result<SourceStream> {
        let file = File::open(location)?;
        Ok(Box::new(file))
    }

    fn name(&self) -> &'static str {
        "path"
    }
}
