//! Loader settings.

use crate::core::cache::CACHE_SUFFIX;
use crate::error::{ConfigError, Result};
use config::{Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where snapshots are cached and how HTTP sources are fetched.
///
/// `LoaderSettings::default()` reads nothing from the environment. Hosts that
/// want file or environment overrides call [`LoaderSettings::load`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Directory holding cache snapshots. Defaults to the process temp dir.
    pub cache_dir: PathBuf,
    /// Appended to the sanitized location to form the cache file name.
    pub cache_suffix: String,
    /// HTTP request timeout in milliseconds; the client default when unset.
    pub http_timeout_ms: Option<u64>,
    /// `User-Agent` for HTTP requests; the client default when unset.
    pub user_agent: Option<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir(),
            cache_suffix: CACHE_SUFFIX.to_string(),
            http_timeout_ms: None,
            user_agent: None,
        }
    }
}

impl LoaderSettings {
    /// Layer an optional TOML settings file under prefixed environment variables.
    ///
    /// With prefix `CACHED_PROPS`, `CACHED_PROPS_CACHE_DIR=/var/cache/app`
    /// sets `cache_dir`. Missing files are ignored; unset fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a value has the wrong type.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cached_props::core::LoaderSettings;
    /// use std::path::Path;
    ///
    /// # fn example() -> cached_props::error::Result<()> {
    /// let settings = LoaderSettings::load(Some(Path::new("/etc/app/cached-props.toml")), "CACHED_PROPS")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let env_source = Environment::with_prefix(env_prefix)
            .prefix_separator("_")
            .separator("__");

        let settings = builder
            .add_source(env_source)
            .build()
            .map_err(|e| ConfigError::SettingsError(format!("Failed to read settings: {}", e)))?;

        settings.try_deserialize::<Self>().map_err(|e| {
            ConfigError::SettingsError(format!("Failed to parse settings: {}", e))
        })
    }

    /// The configured HTTP timeout, if any.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_ms.map(Duration::from_millis)
    }

    /// Set the HTTP timeout, rounding up to the next whole millisecond.
    pub fn set_http_timeout(&mut self, timeout: Duration) {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.http_timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = LoaderSettings::default();
        assert_eq!(settings.cache_dir, std::env::temp_dir());
        assert_eq!(settings.cache_suffix, ".cache");
        assert_eq!(settings.http_timeout(), None);
    }

    #[test]
    fn test_load_without_sources_gives_defaults() {
        let settings = LoaderSettings::load(None, "CACHED_PROPS_TEST_UNSET").unwrap();
        assert_eq!(settings, LoaderSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(
            &path,
            r#"
cache_dir = "/var/cache/app"
http_timeout_ms = 5000
"#,
        )
        .unwrap();

        let settings = LoaderSettings::load(Some(&path), "CACHED_PROPS_TEST_FILE").unwrap();
        assert_eq!(settings.cache_dir, PathBuf::from("/var/cache/app"));
        assert_eq!(settings.http_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.cache_suffix, ".cache");
    }

    #[test]
    fn test_missing_file_ignored() {
        let settings =
            LoaderSettings::load(Some(Path::new("/nonexistent/settings.toml")), "CACHED_PROPS_TEST_MISSING")
                .unwrap();
        assert_eq!(settings.cache_suffix, ".cache");
    }

    #[test]
    fn test_invalid_type_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "http_timeout_ms = \"soon\"\n").unwrap();

        let result = LoaderSettings::load(Some(&path), "CACHED_PROPS_TEST_INVALID");
        assert!(matches!(result, Err(ConfigError::SettingsError(_))));
    }

    #[test]
    fn test_set_http_timeout_keeps_sub_second() {
        let mut settings = LoaderSettings::default();
        settings.set_http_timeout(Duration::from_millis(500));
        assert_eq!(settings.http_timeout_ms, Some(500));

        settings.set_http_timeout(Duration::from_micros(1));
        assert_eq!(settings.http_timeout(), Some(Duration::from_millis(1)));

        settings.set_http_timeout(Duration::ZERO);
        assert_eq!(settings.http_timeout_ms, Some(0));
    }
}
