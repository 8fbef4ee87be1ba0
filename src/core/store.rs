//! Property namespaces the loader writes into.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// A string-keyed property namespace.
///
/// The loader only checks existence and sets keys; it never deletes or
/// enumerates. Implement this trait to load into a host's own configuration.
pub trait PropertyStore {
    /// Current value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any existing value.
    fn set(&mut self, key: &str, value: &str);

    /// Returns true if `key` is set.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl PropertyStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Process-wide property namespace.
///
/// Reads are lock-free and see a consistent map. Each `set` publishes a new
/// map, so writes are meant for startup, not hot paths.
///
/// # Examples
///
/// ```rust
/// use cached_props::core::GlobalProperties;
///
/// let props = GlobalProperties::new();
/// props.set("server.port", "8080");
/// assert_eq!(props.get("server.port").as_deref(), Some("8080"));
/// ```
pub struct GlobalProperties {
    current: ArcSwap<HashMap<String, String>>,
}

impl GlobalProperties {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Current value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<String> {
        self.current.load().get(key).cloned()
    }

    /// Set `key` to `value`.
    pub fn set(&self, key: &str, value: &str) {
        self.current.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(key.to_string(), value.to_string());
            next
        });
    }

    /// Reference-counted view of every property at this instant.
    pub fn snapshot(&self) -> Arc<HashMap<String, String>> {
        self.current.load_full()
    }
}

impl Default for GlobalProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore for &GlobalProperties {
    fn get(&self, key: &str) -> Option<String> {
        GlobalProperties::get(self, key)
    }

    fn set(&mut self, key: &str, value: &str) {
        GlobalProperties::set(self, key, value);
    }
}

static GLOBAL: LazyLock<GlobalProperties> = LazyLock::new(GlobalProperties::new);

/// The process-wide namespace used by [`bootstrap`](crate::bootstrap).
pub fn global() -> &'static GlobalProperties {
    &GLOBAL
}
