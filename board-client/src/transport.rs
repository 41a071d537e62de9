use std::sync::Arc;

use async_trait::async_trait;
use board_auth::{derive_context, JwtVerifier};
use board_core::errors::BoardError;
use board_graph::{Operation, ResolutionEngine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ClientResult;

/// One operation on its way to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub operation: Operation,
    /// `Authorization` header value, e.g. `Bearer <token>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl OperationRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

/// Carries a request to whatever resolves it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: OperationRequest) -> ClientResult<Value>;
}

/// Resolves requests against an engine in the same process.
///
/// Each request gets its own authorization context: the credential is
/// verified, its principal looked up, and the result handed to the engine.
#[derive(Clone)]
pub struct InProcessTransport {
    engine: Arc<ResolutionEngine>,
    verifier: Arc<JwtVerifier>,
}

impl InProcessTransport {
    pub fn new(engine: Arc<ResolutionEngine>, verifier: JwtVerifier) -> Self {
        Self {
            engine,
            verifier: Arc::new(verifier),
        }
    }

    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    /// Resolve `request`, keeping the structured error for the caller.
    pub async fn handle(&self, request: &OperationRequest) -> Result<Value, BoardError> {
        let principal = self
            .verifier
            .principal_from_header(request.credential.as_deref())
            .map_err(BoardError::normalize)?;

        let users = self.engine.store().users.clone();
        let auth = derive_context(users.as_ref(), principal.as_deref())
            .await
            .map_err(BoardError::normalize)?;

        debug!(
            operation = %request.operation.display_name(),
            authenticated = auth.is_authenticated(),
            "executing"
        );

        self.engine
            .resolve(&request.operation, &auth)
            .await
            .map_err(|e| e.to_board_error())
    }
}

#[async_trait]
impl Transport for InProcessTransport {
    async fn execute(&self, request: OperationRequest) -> ClientResult<Value> {
        Ok(self.handle(&request).await?)
    }
}
