//! Built-in resolvers of the job board graph.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{GraphError, GraphResult};
use crate::registry::{RegistryBuilder, ResolverRegistry};
use crate::resolver::{FieldResolver, ResolveContext};
use crate::schema::{Schema, TypeTag};
use crate::selection::Arguments;
use crate::value::{Node, Resolved};

/// `Query.jobs`: every job, in store order.
pub struct AllJobs;

#[async_trait]
impl FieldResolver for AllJobs {
    async fn resolve(&self, _parent: &Node, _args: &Arguments, ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        let jobs = ctx.store.jobs.list().await?;
        Ok(Resolved::list(jobs))
    }
}

/// `Query.job(id)`
pub struct JobById;

#[async_trait]
impl FieldResolver for JobById {
    async fn resolve(&self, _parent: &Node, args: &Arguments, ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        let id = args.require_str("id")?;
        ctx.store
            .jobs
            .get(id)
            .await?
            .map(Resolved::object)
            .ok_or_else(|| GraphError::not_found("Job", id))
    }
}

/// `Query.company(id)`
pub struct CompanyById;

#[async_trait]
impl FieldResolver for CompanyById {
    async fn resolve(&self, _parent: &Node, args: &Arguments, ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        let id = args.require_str("id")?;
        ctx.store
            .companies
            .get(id)
            .await?
            .map(Resolved::object)
            .ok_or_else(|| GraphError::not_found("Company", id))
    }
}

/// `Job.company`: the company the job's `companyId` points at.
pub struct JobCompany;

#[async_trait]
impl FieldResolver for JobCompany {
    async fn resolve(&self, parent: &Node, _args: &Arguments, ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        let Node::Job(job) = parent else {
            return Err(unexpected_parent(TypeTag::Job, parent));
        };
        ctx.store
            .companies
            .get(&job.company_id)
            .await?
            .map(Resolved::object)
            .ok_or_else(|| GraphError::not_found("Company", &job.company_id))
    }
}

/// `Company.jobs`: jobs whose `companyId` is this company, in store order.
pub struct CompanyJobs;

#[async_trait]
impl FieldResolver for CompanyJobs {
    async fn resolve(&self, parent: &Node, _args: &Arguments, ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        let Node::Company(company) = parent else {
            return Err(unexpected_parent(TypeTag::Company, parent));
        };
        let jobs = ctx.store.jobs.list().await?;
        Ok(Resolved::list(
            jobs.into_iter().filter(|job| job.company_id == company.id),
        ))
    }
}

/// `Mutation.createJob(input)`
///
/// Requires an authenticated principal. The new job always belongs to the
/// principal's company; a `companyId` in the input is overwritten.
pub struct CreateJob;

#[async_trait]
impl FieldResolver for CreateJob {
    async fn resolve(&self, _parent: &Node, args: &Arguments, ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        let Some(user) = ctx.auth.user() else {
            warn!("createJob rejected: no authenticated principal");
            return Err(GraphError::Unauthorized);
        };

        let mut fields = args.require_object("input")?.clone();
        for key in ["title", "description"] {
            if !fields.get(key).is_some_and(Value::is_string) {
                return Err(GraphError::resolution(format!(
                    "Invalid job input: `{key}` must be a string"
                )));
            }
        }
        fields.insert(
            "companyId".to_string(),
            Value::String(user.company_id.clone()),
        );

        let id = ctx.store.jobs.create(fields).await?;
        let job = ctx.store.jobs.get(&id).await?.ok_or_else(|| {
            GraphError::resolution(format!("created job {id} could not be read back"))
        })?;

        info!(job = %job.id, company = %job.company_id, user = %user.id, "job created");
        Ok(Resolved::object(job))
    }
}

fn unexpected_parent(expected: TypeTag, parent: &Node) -> GraphError {
    GraphError::resolution(format!(
        "expected a {expected} parent, got {}",
        parent.type_tag()
    ))
}

/// Registry with every built-in resolver, checked against `schema`.
pub fn job_board_registry(schema: &Schema) -> GraphResult<ResolverRegistry> {
    RegistryBuilder::new()
        .register(TypeTag::Query, "jobs", AllJobs)
        .register(TypeTag::Query, "job", JobById)
        .register(TypeTag::Query, "company", CompanyById)
        .register(TypeTag::Mutation, "createJob", CreateJob)
        .register(TypeTag::Job, "company", JobCompany)
        .register(TypeTag::Company, "jobs", CompanyJobs)
        .build(schema)
}
