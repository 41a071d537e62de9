//! Job board operations.
//!
//! Reads of a single job go through the `JobQuery` operation keyed by the
//! job id, so a job returned by `CreateJob` can be written under that key and
//! served to a later `load_job` without a round trip.

use board_graph::{field, Field, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::BoardClient;
use crate::error::{ClientError, ClientResult};
use crate::policy::FetchPolicy;

/// Fields of a job as every job-board screen shows it.
fn job_fields() -> Vec<Field> {
    vec![
        field("id"),
        field("title"),
        field("company").select([field("id"), field("name")]),
        field("description"),
    ]
}

pub fn jobs_query() -> Operation {
    Operation::query("JobsQuery").select([field("jobs").select(job_fields())])
}

pub fn job_query(id: &str) -> Operation {
    Operation::query("JobQuery")
        .variable("id", id)
        .select([field("job").var("id", "id").select(job_fields())])
}

pub fn company_query(id: &str) -> Operation {
    Operation::query("CompanyQuery")
        .variable("id", id)
        .select([field("company").var("id", "id").select([
            field("id"),
            field("name"),
            field("description"),
            field("jobs").select([field("id"), field("title")]),
        ])])
}

pub fn create_job_mutation(input: &JobInput) -> ClientResult<Operation> {
    let input = serde_json::to_value(input)
        .map_err(|e| ClientError::transport(format!("could not encode job input: {e}")))?;

    Ok(Operation::mutation("CreateJob")
        .variable("input", input)
        .select([field("createJob")
            .alias("job")
            .var("input", "input")
            .select(job_fields())]))
}

/// What a user may set when posting a job. The company is always the
/// poster's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl JobInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateJobOutcome {
    Created { id: String, job: Value },
    Rejected { reason: String },
}

impl BoardClient {
    /// Every job, always fresh from the backend.
    pub async fn load_jobs(&self) -> ClientResult<Vec<Value>> {
        let tree = self.query(&jobs_query(), FetchPolicy::NetworkOnly).await?;
        match tree.get("jobs") {
            Some(Value::Array(jobs)) => Ok(jobs.clone()),
            _ => Err(ClientError::transport("response has no jobs list")),
        }
    }

    /// One job, served from the cache when it is there.
    pub async fn load_job(&self, id: &str) -> ClientResult<Option<Value>> {
        let tree = self.query(&job_query(id), FetchPolicy::CacheFirst).await?;
        Ok(non_null(&tree, "job"))
    }

    pub async fn load_company(&self, id: &str) -> ClientResult<Option<Value>> {
        let tree = self.query(&company_query(id), FetchPolicy::CacheFirst).await?;
        Ok(non_null(&tree, "company"))
    }

    /// Post a job as the logged-in user.
    ///
    /// On success the new job is cached as the answer to `JobQuery(id)`.
    /// A rejection by the backend is an outcome, not an error; nothing is
    /// cached for it.
    pub async fn create_job(&self, input: &JobInput) -> ClientResult<CreateJobOutcome> {
        let op = create_job_mutation(input)?;

        let tree = match self.mutate(&op).await {
            Ok(tree) => tree,
            Err(ClientError::Rejected { name, message }) => {
                warn!(error = %name, reason = %message, "createJob rejected");
                return Ok(CreateJobOutcome::Rejected { reason: message });
            }
            Err(err) => return Err(err),
        };

        let job = non_null(&tree, "job")
            .ok_or_else(|| ClientError::transport("createJob returned no job"))?;
        let id = job
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::transport("created job has no id"))?
            .to_string();

        self.write_query(&job_query(&id), serde_json::json!({ "job": job.clone() }));
        info!(job = %id, "job created and cached");

        Ok(CreateJobOutcome::Created { id, job })
    }
}

fn non_null(tree: &Value, key: &str) -> Option<Value> {
    tree.get(key).filter(|v| !v.is_null()).cloned()
}
