//! Fetch, cache and apply pipeline.

use crate::core::cache::CachePath;
use crate::core::properties::PropertyTable;
use crate::core::settings::LoaderSettings;
use crate::core::store::PropertyStore;
use crate::error::{Result, triage};
use crate::sources::{FetchStrategy, SourceSpec, SourceStream, parse_source_specs};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// What one source contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// The location as given in the source spec
    pub location: String,
    /// Stable cache file consulted, `None` for an empty location
    pub cache_path: Option<PathBuf>,
    /// A fresh snapshot was fetched and promoted this run
    pub refreshed: bool,
    /// Keys written to the store
    pub applied: usize,
    /// Keys left alone because they were already set
    pub skipped: usize,
}

/// Fetches sources, keeps their cache snapshots current, and applies them.
///
/// Strategies are tried in order; every strategy that accepts a location gets
/// a chance to open it until one succeeds. The default order is scheme-based
/// URL opening followed by bare filesystem paths.
pub struct PropertyLoader {
    settings: LoaderSettings,
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl PropertyLoader {
    pub(crate) fn from_parts(settings: LoaderSettings, strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self {
            settings,
            strategies,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Names of the fetch strategies in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Cache paths for `location` under the configured directory.
    pub fn cache_path(&self, location: &str) -> CachePath {
        CachePath::resolve(&self.settings.cache_dir, location, &self.settings.cache_suffix)
    }

    /// Parse the invocation string and apply every source in order.
    ///
    /// A failing source never stops the ones after it.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions; sources already applied stay applied.
    pub fn load_all<S>(&self, raw: Option<&str>, store: &mut S) -> Result<Vec<ApplyReport>>
    where
        S: PropertyStore + ?Sized,
    {
        parse_source_specs(raw)
            .iter()
            .map(|spec| self.refresh_and_apply(spec, store))
            .collect()
    }

    /// Refresh the cache for one source and merge the cached properties into `store`.
    ///
    /// A fetch failure falls back to whatever snapshot is already cached. With
    /// `force` every key is written; without it only keys absent from `store` are.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions. Fetch, cache and read
    /// failures are logged and leave the report with nothing applied.
    pub fn refresh_and_apply<S>(&self, spec: &SourceSpec, store: &mut S) -> Result<ApplyReport>
    where
        S: PropertyStore + ?Sized,
    {
        let location = spec.location();
        let mut report = ApplyReport {
            location: location.to_string(),
            ..ApplyReport::default()
        };
        if location.is_empty() {
            return Ok(report);
        }

        let cache = self.cache_path(location);
        report.cache_path = Some(cache.stable().to_path_buf());

        if let Some(mut stream) = self.fetch(location)? {
            report.refreshed = self.refresh(&cache, &mut stream)?;
        }

        debug!(cache = %cache.stable().display(), "Reading properties from cache file");
        let snapshot = match triage(cache.read_stable())? {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(location, error = %e, "Unable to load cached properties");
                return Ok(report);
            }
        };

        let table = PropertyTable::parse(&snapshot);
        for (key, value) in &table {
            if spec.force() || !store.contains(key) {
                debug!(forced = spec.force(), property = %key, "Setting property");
                store.set(key, value);
                report.applied += 1;
            } else {
                report.skipped += 1;
            }
        }

        info!(
            location,
            refreshed = report.refreshed,
            applied = report.applied,
            skipped = report.skipped,
            "Applied properties"
        );
        Ok(report)
    }

    /// Open the first stream any accepting strategy can produce.
    ///
    /// Failures with another tier still to try are warnings; the last one is an error.
    fn fetch(&self, location: &str) -> Result<Option<SourceStream>> {
        let accepting: Vec<&dyn FetchStrategy> = self
            .strategies
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| s.accepts(location))
            .collect();
        let mut failed: Option<&'static str> = None;

        for (i, strategy) in accepting.iter().enumerate() {
            if let Some(previous) = failed {
                // A structurally invalid URL is retried as a path here too.
                debug!(location, previous, next = strategy.name(), "Retrying with next strategy");
            }
            debug!(location, strategy = strategy.name(), "Loading data");

            match triage(strategy.open(location))? {
                Ok(stream) => return Ok(Some(stream)),
                Err(e) if i + 1 < accepting.len() => {
                    warn!(location, strategy = strategy.name(), error = %e, "Unable to open source");
                    failed = Some(strategy.name());
                }
                Err(e) => {
                    error!(location, strategy = strategy.name(), error = %e, "Unable to open source");
                }
            }
        }

        Ok(None)
    }

    /// Write and promote a fresh snapshot. Returns whether the stable file was replaced.
    fn refresh(&self, cache: &CachePath, stream: &mut SourceStream) -> Result<bool> {
        if let Err(e) = triage(cache.write_pending(stream))? {
            error!(cache = %cache.stable().display(), error = %e, "Unable to create cache file");
            return Ok(false);
        }
        if let Err(e) = triage(cache.promote())? {
            error!(cache = %cache.stable().display(), error = %e, "Unable to promote cache file");
            return Ok(false);
        }
        Ok(true)
    }
}
