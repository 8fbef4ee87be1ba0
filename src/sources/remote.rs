//! Scheme-based strategy for `http:`, `https:` and `file:` locations.

use super::{FetchStrategy, SourceStream};
use crate::error::{ConfigError, Result};
use std::fs::File;
use std::time::Duration;
use url::Url;

#[cfg(feature = "remote")]
use reqwest::blocking::Client;

/// Location prefixes that route through URL parsing rather than bare paths.
pub const URL_PREFIXES: [&str; 3] = ["http:", "https:", "file:"];

/// Opens HTTP/HTTPS URLs with a blocking client and `file:` URLs from disk.
///
/// HTTP requests are only available with the `remote` feature; without it
/// HTTP locations fail with [`ConfigError::FeatureNotEnabled`] and the loader
/// moves on to the next tier.
///
/// # Examples
///
/// ```rust,no_run
/// use cached_props::sources::{FetchStrategy, UrlFetcher};
/// use std::time::Duration;
///
/// # fn example() -> cached_props::error::Result<()> {
/// let fetcher = UrlFetcher::builder()
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
/// let stream = fetcher.open("https://config.example.com/system.properties")?;
/// # Ok(())
/// # }
/// ```
pub struct UrlFetcher {
    #[cfg(feature = "remote")]
    client: Client,
}

impl UrlFetcher {
    /// Create a new builder for constructing a URL fetcher.
    pub fn builder() -> UrlFetcherBuilder {
        UrlFetcherBuilder::new()
    }

    fn parse(location: &str) -> Result<Url> {
        Url::parse(location).map_err(|e| ConfigError::InvalidLocation {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }

    fn open_file_url(location: &str, url: &Url) -> Result<SourceStream> {
        let path = url
            .to_file_path()
            .map_err(|()| ConfigError::InvalidLocation {
                location: location.to_string(),
                reason: "not a local file URL".to_string(),
            })?;
        let file = File::open(path)?;
        Ok(Box::new(file))
    }

    #[cfg(feature = "remote")]
    fn open_http(&self, location: &str, url: Url) -> Result<SourceStream> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::FetchError {
                location: location.to_string(),
                reason: format!(
                    "HTTP request failed with status {}: {}",
                    status,
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        Ok(Box::new(response))
    }

    #[cfg(not(feature = "remote"))]
    fn open_http(&self, _location: &str, _url: Url) -> Result<SourceStream> {
        Err(ConfigError::FeatureNotEnabled("remote"))
    }
}

impl FetchStrategy for UrlFetcher {
    fn accepts(&self, location: &str) -> bool {
        URL_PREFIXES
            .iter()
            .any(|prefix| location.starts_with(*prefix))
    }

    fn open(&self, location: &str) -> Result<SourceStream> {
        if let Some(relative) = relative_file_path(location) {
            let file = File::open(relative)?;
            return Ok(Box::new(file));
        }

        let url = Self::parse(location)?;
        match url.scheme() {
            "http" | "https" => self.open_http(location, url),
            "file" => Self::open_file_url(location, &url),
            other => Err(ConfigError::InvalidLocation {
                location: location.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "url"
    }
}

/// `file:` not followed by `/` names a path relative to the working directory.
fn relative_file_path(location: &str) -> Option<&str> {
    location
        .strip_prefix("file:")
        .filter(|rest| !rest.starts_with('/'))
}

/// Builder for constructing a [`UrlFetcher`].
#[derive(Debug, Clone, Default)]
pub struct UrlFetcherBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl UrlFetcherBuilder {
    /// Create a new builder with the HTTP client's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    ///
    /// When unset the HTTP client's own default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header sent with HTTP requests.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[cfg(feature = "remote")]
    pub fn build(self) -> Result<UrlFetcher> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::SettingsError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(UrlFetcher { client })
    }

    /// Build the fetcher.
    #[cfg(not(feature = "remote"))]
    pub fn build(self) -> Result<UrlFetcher> {
        Ok(UrlFetcher {})
    }
}
