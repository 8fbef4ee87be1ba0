//! Builder for constructing PropertyLoader instances.

use crate::core::{LoaderSettings, PropertyLoader};
use crate::error::Result;
use crate::sources::{FetchStrategy, PathFetcher, UrlFetcher};
use std::path::PathBuf;
use std::time::Duration;

/// Builder for constructing a [`PropertyLoader`].
///
/// The built loader tries any custom strategies first, then `http:`, `https:`
/// and `file:` URLs, then bare filesystem paths.
///
/// # Examples
///
/// ```rust,no_run
/// use cached_props::prelude::*;
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// # fn example() -> Result<()> {
/// let loader = PropertyLoader::builder()
///     .with_cache_dir("/var/cache/app")
///     .with_http_timeout(Duration::from_secs(10))
///     .build()?;
///
/// let mut props: HashMap<String, String> = HashMap::new();
/// loader.load_all(Some("!https://config.example.com/app.properties,/etc/app/local.properties"), &mut props)?;
/// # Ok(())
/// # }
/// ```
pub struct PropertyLoaderBuilder {
    settings: LoaderSettings,
    custom_strategies: Vec<Box<dyn FetchStrategy>>,
}

impl PropertyLoaderBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: LoaderSettings::default(),
            custom_strategies: Vec::new(),
        }
    }

    /// Replace all settings at once, e.g. with ones from [`LoaderSettings::load`].
    pub fn with_settings(mut self, settings: LoaderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Directory holding cache snapshots.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.cache_dir = dir.into();
        self
    }

    /// Suffix appended to cache file names.
    pub fn with_cache_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.settings.cache_suffix = suffix.into();
        self
    }

    /// HTTP request timeout, kept to millisecond precision.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.settings.set_http_timeout(timeout);
        self
    }

    /// `User-Agent` sent with HTTP requests.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = Some(user_agent.into());
        self
    }

    /// Add a strategy tried before the built-in ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cached_props::prelude::*;
    /// use cached_props::sources::PathFetcher;
    ///
    /// # fn example() -> Result<()> {
    /// let loader = PropertyLoader::builder()
    ///     .with_strategy(PathFetcher)
    ///     .build()?;
    /// assert_eq!(loader.strategy_names(), vec!["path", "url", "path"]);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn with_strategy<F: FetchStrategy + 'static>(mut self, strategy: F) -> Self {
        self.custom_strategies.push(Box::new(strategy));
        self
    }

    /// Build the loader.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<PropertyLoader> {
        let mut url_fetcher = UrlFetcher::builder();
        if let Some(timeout) = self.settings.http_timeout() {
            url_fetcher = url_fetcher.with_timeout(timeout);
        }
        if let Some(user_agent) = &self.settings.user_agent {
            url_fetcher = url_fetcher.with_user_agent(user_agent.clone());
        }

        let mut strategies = self.custom_strategies;
        strategies.push(Box::new(url_fetcher.build()?));
        strategies.push(Box::new(PathFetcher));

        Ok(PropertyLoader::from_parts(self.settings, strategies))
    }
}

impl Default for PropertyLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyLoader {
    /// Create a new builder for constructing a loader.
    pub fn builder() -> PropertyLoaderBuilder {
        PropertyLoaderBuilder::new()
    }
}
