use serde::{Deserialize, Serialize};

/// How a read interacts with the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Always ask the backend; never read or write the cache.
    NetworkOnly,
    /// Serve a cached tree when present, otherwise fetch and cache it under
    /// the request's own key.
    #[default]
    CacheFirst,
}

impl FetchPolicy {
    pub fn uses_cache(&self) -> bool {
        matches!(self, FetchPolicy::CacheFirst)
    }
}
