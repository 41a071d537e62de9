//! board-client: issue job board operations and cache their results.

pub mod cache;
pub mod client;
pub mod error;
pub mod policy;
pub mod queries;
pub mod transport;

pub use cache::{CacheKey, NormalizedCache};
pub use client::BoardClient;
pub use error::{ClientError, ClientResult};
pub use policy::FetchPolicy;
pub use queries::{company_query, create_job_mutation, job_query, jobs_query, CreateJobOutcome, JobInput};
pub use transport::{InProcessTransport, OperationRequest, Transport};
