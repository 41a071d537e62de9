//! Store collaborator: one collection per record type.
//!
//! The resolver layer only needs `list`, `get` and `create`; anything that can
//! provide those (a database, a remote API) can stand behind [`Collection`].
//! [`MemoryCollection`] is the in-process implementation used by the
//! application and the tests.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::BoardError;
use crate::model::{Company, Job, Record, User};

#[async_trait]
pub trait Collection<R>: Send + Sync
where
    R: Record,
{
    /// Every record, in store-native order.
    async fn list(&self) -> Result<Vec<R>>;

    /// The record with `id`, or `None` when absent.
    async fn get(&self, id: &str) -> Result<Option<R>>;

    /// Store a new record built from `fields` and return its generated id.
    ///
    /// Any `id` present in `fields` is replaced.
    async fn create(&self, fields: Map<String, Value>) -> Result<String>;
}

/// Insertion-ordered in-memory collection.
pub struct MemoryCollection<R> {
    records: RwLock<Vec<R>>,
}

impl<R> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> MemoryCollection<R>
where
    R: Record,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Load `<dir>/<collection>.json`, a JSON array of records.
    ///
    /// A missing file is an empty collection.
    pub async fn load_json(dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{}.json", R::COLLECTION));

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no data file, starting empty");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        let records: Vec<R> = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        info!(
            collection = R::COLLECTION,
            count = records.len(),
            "loaded records"
        );
        Ok(Self::from_records(records))
    }
}

#[async_trait]
impl<R> Collection<R> for MemoryCollection<R>
where
    R: Record,
{
    async fn list(&self) -> Result<Vec<R>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<R>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, mut fields: Map<String, Value>) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        fields.insert("id".to_string(), Value::String(id.clone()));

        let record: R = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            BoardError::unprocessable(format!("Invalid {} record", R::COLLECTION))
                .with_errors(json!({ "_schema": [e.to_string()] }))
                .into_anyhow()
        })?;

        self.records.write().await.push(record);
        Ok(id)
    }
}

/// The collections the job board reads and writes.
#[derive(Clone)]
pub struct Store {
    pub jobs: Arc<dyn Collection<Job>>,
    pub companies: Arc<dyn Collection<Company>>,
    pub users: Arc<dyn Collection<User>>,
}

impl Store {
    /// Empty in-memory store.
    pub fn memory() -> Self {
        Self::from_records(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn from_records(jobs: Vec<Job>, companies: Vec<Company>, users: Vec<User>) -> Self {
        Self {
            jobs: Arc::new(MemoryCollection::from_records(jobs)),
            companies: Arc::new(MemoryCollection::from_records(companies)),
            users: Arc::new(MemoryCollection::from_records(users)),
        }
    }

    /// In-memory store seeded from the JSON files in `dir`.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            jobs: Arc::new(MemoryCollection::<Job>::load_json(dir).await?),
            companies: Arc::new(MemoryCollection::<Company>::load_json(dir).await?),
            users: Arc::new(MemoryCollection::<User>::load_json(dir).await?),
        })
    }
}
