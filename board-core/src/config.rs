//! # Board configuration
//!
//! A minimal, framework-agnostic configuration store based on string
//! key/value pairs, in the spirit of Feathers' `app.set()` / `app.get()`.
//!
//! ## Setting and reading values
//! ```rust
//! use board_core::BoardConfig;
//! let mut config = BoardConfig::new();
//!
//! config.set("data.dir", "./data");
//! config.set("log.filter", "debug");
//!
//! assert_eq!(config.get("data.dir"), Some("./data"));
//! ```
//!
//! ## Environment overrides
//! `load_env` maps prefixed environment variables onto dotted keys:
//!
//! ```bash
//! export JOBBOARD__DATA__DIR=/srv/board/data   # -> data.dir
//! ```

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct BoardConfig {
    values: HashMap<String, String>,
}

impl BoardConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Check whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Override keys from environment variables starting with `prefix`.
    ///
    /// `PREFIX__PAGINATE__DEFAULT` becomes `paginate.default`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped
                    .trim_start_matches("__")
                    .to_lowercase()
                    .replace("__", ".");
                if normalized.is_empty() {
                    continue;
                }
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> BoardConfigSnapshot {
        BoardConfigSnapshot::new(self.values.clone())
    }
}

/// Read-only view of the configuration, handed to components at startup.
#[derive(Debug, Clone, Default)]
pub struct BoardConfigSnapshot {
    map: HashMap<String, String>,
}

impl BoardConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_map_to_dotted_keys() {
        let mut config = BoardConfig::new();
        config.load_vars(
            "JOBBOARD",
            vec![
                ("JOBBOARD__DATA__DIR".to_string(), "/srv/data".to_string()),
                ("JOBBOARD__LOG__FILTER".to_string(), "debug".to_string()),
                ("OTHER__DATA__DIR".to_string(), "/nope".to_string()),
            ],
        );

        assert_eq!(config.get("data.dir"), Some("/srv/data"));
        assert_eq!(config.get("log.filter"), Some("debug"));
        assert!(!config.has("other.data.dir"));
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let mut config = BoardConfig::new();
        config.set("log.filter", "debug");
        let snapshot = config.snapshot();
        config.set("log.filter", "warn");

        assert_eq!(snapshot.get("log.filter"), Some("debug"));
        assert_eq!(snapshot.get_or("data.dir", "./data"), "./data");
    }
}
