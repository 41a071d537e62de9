mod app;

use std::sync::Arc;

use anyhow::{Context, Result};
use board_auth::{JwtOptions, JwtVerifier};
use board_client::{BoardClient, InProcessTransport, OperationRequest};
use board_core::errors::BoardError;
use board_core::{BoardConfigSnapshot, Store};
use board_graph::ResolutionEngine;
use serde_json::{json, Value};
use tracing::{info, warn};

pub use app::{board_config, defaults, ENV_PREFIX};

/// The assembled backend: store, engine and in-process transport.
pub struct JobBoard {
    pub config: BoardConfigSnapshot,
    transport: InProcessTransport,
}

/// Load the store from `data.dir` and wire the engine behind a transport.
pub async fn build(config: BoardConfigSnapshot) -> Result<JobBoard> {
    let data_dir = config.get_or("data.dir", "./data");
    let store = Store::load_dir(&data_dir)
        .await
        .with_context(|| format!("failed to load data from {data_dir}"))?;

    let engine = ResolutionEngine::job_board(store).context("invalid resolver configuration")?;

    let options = JwtOptions::from_config(&config);
    if options.secret.is_none() {
        warn!("auth.secret is not set; every bearer token will be rejected");
    }

    info!(data_dir = %data_dir, "job board ready");
    Ok(JobBoard {
        transport: InProcessTransport::new(Arc::new(engine), JwtVerifier::new(options)),
        config,
    })
}

impl JobBoard {
    pub fn transport(&self) -> &InProcessTransport {
        &self.transport
    }

    /// A client talking to this backend in-process.
    pub fn client(&self) -> BoardClient {
        BoardClient::new(Arc::new(self.transport.clone()))
    }

    /// Run one request and wrap the outcome as `{"data": ..}` or `{"error": ..}`.
    pub async fn execute(&self, request: &OperationRequest) -> Value {
        match self.transport.handle(request).await {
            Ok(tree) => json!({ "data": tree }),
            Err(err) => {
                warn!(error = %err, "operation failed");
                json!({ "error": err.sanitize_for_client().to_json() })
            }
        }
    }

    /// One JSON-lines request: `{"operation": {..}, "credential": ".."}`.
    pub async fn execute_line(&self, line: &str) -> Value {
        match serde_json::from_str::<OperationRequest>(line) {
            Ok(request) => self.execute(&request).await,
            Err(e) => {
                let err = BoardError::bad_request(format!("Malformed request: {e}"));
                json!({ "error": err.to_json() })
            }
        }
    }
}
