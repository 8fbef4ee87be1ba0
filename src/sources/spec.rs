//! Parsing of the `[!]location(,[!]location)*` invocation string.

/// Separates specifiers in the invocation string.
pub const SPEC_DELIMITER: char = ',';

/// Prefix that makes a source overwrite properties that are already set.
pub const FORCE_MARKER: char = '!';

/// A single source to fetch and apply.
///
/// # Examples
///
/// ```rust
/// use cached_props::sources::SourceSpec;
///
/// let spec = SourceSpec::from_token("!https://config.example.com/app.properties");
/// assert!(spec.force());
/// assert_eq!(spec.location(), "https://config.example.com/app.properties");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    location: String,
    force: bool,
}

impl SourceSpec {
    /// Create a spec directly.
    pub fn new(location: impl Into<String>, force: bool) -> Self {
        Self {
            location: location.into(),
            force,
        }
    }

    /// Interpret one token, stripping a single leading force marker.
    ///
    /// The location is not validated; a malformed one simply fails to fetch later.
    pub fn from_token(token: &str) -> Self {
        match token.strip_prefix(FORCE_MARKER) {
            Some(location) => Self::new(location, true),
            None => Self::new(token, false),
        }
    }

    /// The URL or filesystem path to fetch from.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Whether properties from this source overwrite existing values.
    pub fn force(&self) -> bool {
        self.force
    }
}

/// Parse the raw invocation string into an ordered list of specs.
///
/// Empty or absent input yields nothing. Tokens are not trimmed and trailing
/// empty tokens are dropped; an empty token in the middle becomes a spec with
/// an empty location, which the loader treats as a no-op.
///
/// # Examples
///
/// ```rust
/// use cached_props::sources::parse_source_specs;
///
/// let specs = parse_source_specs(Some("!file:///etc/app.properties,/opt/app/local.properties"));
/// assert_eq!(specs.len(), 2);
/// assert!(specs[0].force());
/// assert!(!specs[1].force());
///
/// assert!(parse_source_specs(None).is_empty());
/// ```
pub fn parse_source_specs(raw: Option<&str>) -> Vec<SourceSpec> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    let mut tokens: Vec<&str> = raw.split(SPEC_DELIMITER).collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }

    tokens.into_iter().map(SourceSpec::from_token).collect()
}
