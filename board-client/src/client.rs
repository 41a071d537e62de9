use std::sync::Arc;

use board_graph::Operation;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheKey, NormalizedCache};
use crate::error::ClientResult;
use crate::policy::FetchPolicy;
use crate::transport::{OperationRequest, Transport};

/// Issues operations through a [`Transport`] and keeps fetched trees in a
/// [`NormalizedCache`].
///
/// The session credential, once set, is attached to every request.
pub struct BoardClient {
    transport: Arc<dyn Transport>,
    cache: NormalizedCache,
    credential: RwLock<Option<String>>,
}

impl BoardClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: NormalizedCache::new(),
            credential: RwLock::new(None),
        }
    }

    /// Use `credential` (an `Authorization` header value) from now on.
    pub fn login(&self, credential: impl Into<String>) {
        *self.credential.write() = Some(credential.into());
    }

    pub fn logout(&self) {
        *self.credential.write() = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential.read().is_some()
    }

    pub fn cache(&self) -> &NormalizedCache {
        &self.cache
    }

    /// Run a read under `policy`.
    pub async fn query(&self, op: &Operation, policy: FetchPolicy) -> ClientResult<Value> {
        if !policy.uses_cache() {
            return self.send(op).await;
        }

        let key = CacheKey::for_operation(op);
        if let Some(tree) = self.cache.read(&key) {
            return Ok(tree);
        }

        let tree = self.send(op).await?;
        self.cache.write(key, tree.clone());
        Ok(tree)
    }

    /// Run a write. Nothing is cached; see [`BoardClient::write_query`].
    pub async fn mutate(&self, op: &Operation) -> ClientResult<Value> {
        self.send(op).await
    }

    /// Store `tree` as the answer to the read `op`.
    pub fn write_query(&self, op: &Operation, tree: Value) {
        self.cache.write(CacheKey::for_operation(op), tree);
    }

    pub fn read_query(&self, op: &Operation) -> Option<Value> {
        self.cache.read(&CacheKey::for_operation(op))
    }

    async fn send(&self, op: &Operation) -> ClientResult<Value> {
        let credential = self.credential.read().clone();
        debug!(operation = %op.display_name(), "sending");

        let mut request = OperationRequest::new(op.clone());
        request.credential = credential;
        self.transport.execute(request).await
    }
}
