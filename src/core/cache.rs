//! Local snapshot cache for fetched sources.
//!
//! Each location maps to a stable cache file under the cache directory. A
//! fresh fetch is written to a `.new` sibling first and then promoted over the
//! stable file, so the stable file only ever holds a complete snapshot.

use crate::error::{ConfigError, Result};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Default suffix appended to the sanitized location.
pub const CACHE_SUFFIX: &str = ".cache";

/// Suffix of the in-progress sibling written before promotion.
pub const PENDING_SUFFIX: &str = ".new";

/// Start of the snapshot header line, followed by the capture timestamp.
pub const BEGIN_MARKER: &str = "# BEGIN # ";

/// Trailer line closing the snapshot.
pub const END_MARKER: &str = "# END #";

/// Replace every character outside `[A-Za-z0-9-]` with `_`.
///
/// Replacement counts UTF-16 code units, so a character outside the Basic
/// Multilingual Plane becomes `__`. The mapping is not injective: `a/b` and
/// `a:b` share a cache file.
pub fn sanitize_location(location: &str) -> String {
    let mut sanitized = String::with_capacity(location.len());
    for c in location.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            sanitized.push(c);
        } else {
            sanitized.extend(std::iter::repeat_n('_', c.len_utf16()));
        }
    }
    sanitized
}

/// Stable and pending cache file paths for one location.
///
/// # Examples
///
/// ```rust
/// use cached_props::core::CachePath;
/// use std::path::Path;
///
/// let cache = CachePath::resolve(Path::new("/tmp"), "https://cfg.local/app.properties", ".cache");
/// assert_eq!(
///     cache.stable(),
///     Path::new("/tmp/https___cfg_local_app_properties.cache")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePath {
    stable: PathBuf,
    pending: PathBuf,
}

impl CachePath {
    /// Derive the cache paths for `location` inside `dir`.
    pub fn resolve(dir: &Path, location: &str, suffix: &str) -> Self {
        let file_name = format!("{}{}", sanitize_location(location), suffix);
        let stable = dir.join(file_name);
        let mut pending = stable.clone().into_os_string();
        pending.push(PENDING_SUFFIX);
        Self {
            stable,
            pending: PathBuf::from(pending),
        }
    }

    /// The authoritative snapshot path.
    pub fn stable(&self) -> &Path {
        &self.stable
    }

    /// The sibling a fresh snapshot is written to before promotion.
    pub fn pending(&self) -> &Path {
        &self.pending
    }

    /// Stream `source` into the pending file wrapped in the snapshot markers.
    ///
    /// Returns the number of payload bytes copied. A partially written pending
    /// file is removed on failure.
    pub fn write_pending<R>(&self, source: &mut R) -> Result<u64>
    where
        R: Read + ?Sized,
    {
        let written = write_snapshot(&self.pending, source);
        if written.is_err() {
            let _ = fs::remove_file(&self.pending);
        }
        written.map_err(|source| ConfigError::CacheWrite {
            path: self.pending.clone(),
            source,
        })
    }

    /// Replace the stable file with the pending one.
    ///
    /// Deletes the stable file and renames the pending file into its place. If
    /// the rename fails the pending file is left behind for the next cycle to
    /// overwrite.
    pub fn promote(&self) -> Result<()> {
        match fs::remove_file(&self.stable) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ConfigError::CacheWrite {
                    path: self.stable.clone(),
                    source,
                });
            }
        }

        fs::rename(&self.pending, &self.stable).map_err(|source| ConfigError::CacheWrite {
            path: self.stable.clone(),
            source,
        })
    }

    /// Read the whole stable snapshot.
    pub fn read_stable(&self) -> Result<Vec<u8>> {
        fs::read(&self.stable).map_err(|source| ConfigError::CacheRead {
            path: self.stable.clone(),
            source,
        })
    }
}

fn write_snapshot<R>(path: &Path, source: &mut R) -> io::Result<u64>
where
    R: Read + ?Sized,
{
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}{}", BEGIN_MARKER, Utc::now().format("%a %b %d %H:%M:%S UTC %Y"))?;
    let copied = io::copy(source, &mut out)?;
    write!(out, "\n{}\n", END_MARKER)?;

    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(copied)
}

/// Extract the fetched bytes from a snapshot.
///
/// Strips the header line and the `\n# END #\n` trailer. Returns `None` if the
/// snapshot is not framed by the markers.
pub fn snapshot_payload(snapshot: &[u8]) -> Option<&[u8]> {
    if !snapshot.starts_with(BEGIN_MARKER.as_bytes()) {
        return None;
    }
    let header_end = snapshot.iter().position(|&b| b == b'\n')?;
    let body = &snapshot[header_end + 1..];

    let trailer = format!("\n{}\n", END_MARKER);
    body.strip_suffix(trailer.as_bytes())
}
