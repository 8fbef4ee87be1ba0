//! # cached-props
//!
//! Startup property loading from remote or local sources, with a durable local
//! cache that stands in when a source is unreachable.
//!
//! ## Overview
//!
//! A host hands over one invocation string listing sources:
//!
//! ```text
//! [!]location(,[!]location)*
//! ```
//!
//! Each `location` is an `http:`/`https:`/`file:` URL or a bare filesystem path.
//! For every source, in order, the loader:
//! - fetches the source and writes a timestamped snapshot next to the stable
//!   cache file, then promotes it over the stable file
//! - reads the stable cache file, whether or not the fetch worked
//! - merges its properties into the namespace: only missing keys by default,
//!   every key when the source is prefixed with `!`
//!
//! Failures are logged through `tracing` and never stop startup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cached_props::prelude::*;
//!
//! # fn example() -> Result<()> {
//! // Applies into the process-wide namespace
//! cached_props::bootstrap(Some("!https://config.example.com/app.properties,/etc/app/local.properties"))?;
//!
//! let port = global().get("server.port");
//! println!("Server port: {:?}", port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cache files
//!
//! Snapshots live in the system temp dir (configurable) under a name derived
//! from the location, every character outside `[A-Za-z0-9-]` replaced by `_`:
//!
//! ```text
//! # BEGIN # Thu Oct 16 09:30:00 UTC 2026
//! <fetched bytes>
//! # END #
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): HTTP/HTTPS sources via `reqwest`. Without it HTTP
//!   locations fall through to the path tier and then to the cache.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

use crate::core::{ApplyReport, PropertyLoader, global};
use crate::error::Result;

/// Load every source in `raw` into the process-wide namespace with default settings.
///
/// This is the single call a host makes at start. Sources are applied in
/// order; failures are logged and skipped.
///
/// # Errors
///
/// Returns an error for fatal conditions, or if the HTTP client cannot be built.
pub fn bootstrap(raw: Option<&str>) -> Result<Vec<ApplyReport>> {
    let loader = PropertyLoader::builder().build()?;
    let mut store = global();
    loader.load_all(raw, &mut store)
}

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ApplyReport, GlobalProperties, LoaderSettings, PropertyLoader, PropertyLoaderBuilder,
        PropertyStore, global,
    };
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::{SourceSpec, parse_source_specs};
}
