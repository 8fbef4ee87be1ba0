//! Source specs and the strategies that fetch them.

mod fetch;
mod file;
mod remote;
mod spec;

pub use fetch::{FetchStrategy, SourceStream};
pub use file::PathFetcher;
pub use remote::{URL_PREFIXES, UrlFetcher, UrlFetcherBuilder};
pub use spec::{FORCE_MARKER, SPEC_DELIMITER, SourceSpec, parse_source_specs};
