//! Client-side result cache.
//!
//! Entries are whole response trees keyed by the operation that produced
//! them: its name plus its argument set, sorted by argument name so that
//! argument order never splits one logical request across two entries.
//! A write fully replaces any previous tree under the same key.

use std::collections::HashMap;
use std::fmt;

use board_graph::{Arguments, Operation};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

/// Identity of a cached read: `(operationName, sortedArgumentPairs)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: String,
    arguments: Vec<(String, String)>,
}

impl CacheKey {
    pub fn new(operation: impl Into<String>, arguments: &Arguments) -> Self {
        let mut arguments: Vec<(String, String)> = arguments
            .iter()
            .map(|(name, value)| (name.clone(), canonical(value).to_string()))
            .collect();
        arguments.sort();

        Self {
            operation: operation.into(),
            arguments,
        }
    }

    /// Key of `op`: its display name, its variables and the arguments its
    /// root fields resolve with, the latter named `<responseKey>.<argument>`.
    pub fn for_operation(op: &Operation) -> Self {
        let mut arguments = op.variables.clone();
        for root in &op.selection {
            for (name, value) in root.bind_arguments(&op.variables).iter() {
                arguments.insert(format!("{}.{name}", root.response_key()), value.clone());
            }
        }
        Self::new(op.display_name(), &arguments)
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn arguments(&self) -> &[(String, String)] {
        &self.arguments
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, (name, value)) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}:{value}")?;
        }
        f.write_str(")")
    }
}

/// Same value with object keys sorted at every level.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let sorted: Map<String, Value> = keys
                .into_iter()
                .map(|k| (k.clone(), canonical(&map[k])))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

#[derive(Default)]
pub struct NormalizedCache {
    entries: RwLock<HashMap<CacheKey, Value>>,
}

impl NormalizedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tree for `key`; `None` is a miss, never an error.
    pub fn read(&self, key: &CacheKey) -> Option<Value> {
        let hit = self.entries.read().get(key).cloned();
        debug!(key = %key, hit = hit.is_some(), "cache read");
        hit
    }

    pub fn write(&self, key: CacheKey, tree: Value) {
        debug!(key = %key, "cache write");
        self.entries.write().insert(key, tree);
    }

    pub fn evict(&self, key: &CacheKey) -> Option<Value> {
        self.entries.write().remove(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, Value)]) -> Arguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn argument_order_does_not_change_the_key() {
        let a = CacheKey::new("JobQuery", &args(&[("id", json!("j1")), ("limit", json!(5))]));
        let b = CacheKey::new("JobQuery", &args(&[("limit", json!(5)), ("id", json!("j1"))]));

        assert_eq!(a, b);
        assert_eq!(a.to_string(), r#"JobQuery(id:"j1",limit:5)"#);
    }

    #[test]
    fn nested_object_key_order_does_not_change_the_key() {
        let a = CacheKey::new("Q", &args(&[("input", json!({ "a": 1, "b": { "x": 1, "y": 2 } }))]));
        let b = CacheKey::new("Q", &args(&[("input", json!({ "b": { "y": 2, "x": 1 }, "a": 1 }))]));

        assert_eq!(a, b);
    }

    #[test]
    fn different_arguments_are_different_keys() {
        let a = CacheKey::new("JobQuery", &args(&[("id", json!("j1"))]));
        let b = CacheKey::new("JobQuery", &args(&[("id", json!("j2"))]));
        let c = CacheKey::new("CompanyQuery", &args(&[("id", json!("j1"))]));

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn write_then_read_returns_the_same_tree() {
        let cache = NormalizedCache::new();
        let key = CacheKey::new("JobQuery", &args(&[("id", json!("j1"))]));
        let tree = json!({ "job": { "id": "j1", "title": "Dev", "company": { "id": "c1", "name": "Acme" } } });

        cache.write(key.clone(), tree.clone());

        assert_eq!(cache.read(&key), Some(tree));
    }

    #[test]
    fn inline_root_arguments_are_part_of_the_key() {
        use board_graph::field;

        let j1 = Operation::query("JobQuery").select([field("job").arg("id", "j1").select([field("id")])]);
        let j2 = Operation::query("JobQuery").select([field("job").arg("id", "j2").select([field("id")])]);
        let via_var = Operation::query("JobQuery")
            .variable("id", "j1")
            .select([field("job").var("id", "id").select([field("id")])]);

        assert_ne!(CacheKey::for_operation(&j1), CacheKey::for_operation(&j2));
        assert_eq!(CacheKey::for_operation(&j1).to_string(), r#"JobQuery(job.id:"j1")"#);
        assert_eq!(
            CacheKey::for_operation(&via_var).to_string(),
            r#"JobQuery(id:"j1",job.id:"j1")"#
        );
    }

    #[test]
    fn miss_is_none() {
        let cache = NormalizedCache::new();
        let key = CacheKey::new("JobQuery", &Arguments::new());

        assert!(cache.read(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn write_replaces_and_evict_removes() {
        let cache = NormalizedCache::new();
        let key = CacheKey::new("Jobs", &Arguments::new());

        cache.write(key.clone(), json!({ "jobs": [1] }));
        cache.write(key.clone(), json!({ "jobs": [2] }));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.read(&key), Some(json!({ "jobs": [2] })));

        assert_eq!(cache.evict(&key), Some(json!({ "jobs": [2] })));
        assert!(cache.read(&key).is_none());

        cache.write(key.clone(), json!({}));
        cache.clear();
        assert!(cache.is_empty());
    }
}
