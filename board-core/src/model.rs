//! Stored records of the job board.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record kept in a store collection.
///
/// Records serialize with camelCase keys so they match the JSON data files.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, also the data file stem (`jobs` -> `jobs.json`).
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub company_id: String,
}

impl Record for Job {
    const COLLECTION: &'static str = "jobs";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Company {
    const COLLECTION: &'static str = "companies";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A principal. Only used to derive authorization; never returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub company_id: String,
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}
