use async_trait::async_trait;
use board_graph::resolvers::{AllJobs, CompanyById, CompanyJobs, CreateJob, JobById, JobCompany};
use board_graph::{
    job_board_registry, Arguments, FieldDef, FieldResolver, GraphError, GraphResult, Node,
    RegistryBuilder, ResolveContext, Resolved, Schema, TypeTag,
};

struct Constant;

#[async_trait]
impl FieldResolver for Constant {
    async fn resolve(&self, _parent: &Node, _args: &Arguments, _ctx: &ResolveContext<'_>) -> GraphResult<Resolved> {
        Ok(Resolved::Scalar("constant".into()))
    }
}

fn full() -> RegistryBuilder {
    RegistryBuilder::new()
        .register(TypeTag::Query, "jobs", AllJobs)
        .register(TypeTag::Query, "job", JobById)
        .register(TypeTag::Query, "company", CompanyById)
        .register(TypeTag::Mutation, "createJob", CreateJob)
        .register(TypeTag::Job, "company", JobCompany)
        .register(TypeTag::Company, "jobs", CompanyJobs)
}

fn configuration_error(result: GraphResult<board_graph::ResolverRegistry>) -> String {
    match result {
        Err(GraphError::Configuration(msg)) => msg,
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("registry should have been rejected"),
    }
}

#[test]
fn job_board_registry_is_complete() {
    let registry = job_board_registry(&Schema::job_board()).unwrap();

    assert_eq!(registry.len(), 6);
    assert!(registry.lookup(TypeTag::Job, "company").is_some());
    assert!(registry.lookup(TypeTag::Job, "title").is_none());
}

#[test]
fn duplicate_registration_is_rejected() {
    let msg = configuration_error(full().register(TypeTag::Query, "jobs", AllJobs).build(&Schema::job_board()));

    assert!(msg.contains("Query.jobs"), "{msg}");
}

#[test]
fn resolver_for_undeclared_field_is_rejected() {
    let msg = configuration_error(
        full()
            .register(TypeTag::Job, "salary", Constant)
            .build(&Schema::job_board()),
    );

    assert!(msg.contains("Job.salary"), "{msg}");
}

#[test]
fn resolver_for_undeclared_type_is_rejected() {
    let schema = Schema::new().object(TypeTag::Query, vec![FieldDef::scalar("version")]);

    let msg = configuration_error(
        RegistryBuilder::new()
            .register(TypeTag::Query, "version", Constant)
            .register(TypeTag::User, "email", Constant)
            .build(&schema),
    );

    assert!(msg.contains("User"), "{msg}");
}

#[test]
fn object_field_without_resolver_is_rejected() {
    let registry = RegistryBuilder::new()
        .register(TypeTag::Query, "jobs", AllJobs)
        .register(TypeTag::Query, "job", JobById)
        .register(TypeTag::Query, "company", CompanyById)
        .register(TypeTag::Mutation, "createJob", CreateJob)
        .register(TypeTag::Company, "jobs", CompanyJobs)
        .build(&Schema::job_board());

    let msg = configuration_error(registry);
    assert_eq!(msg, "no resolver for Job.company");
}

#[test]
fn scalar_fields_fall_back_to_properties() {
    let schema = Schema::new().object(TypeTag::Query, vec![FieldDef::scalar("version")]).object(
        TypeTag::Job,
        vec![FieldDef::scalar("id").non_null(), FieldDef::scalar("title")],
    );

    let registry = RegistryBuilder::new()
        .register(TypeTag::Query, "version", Constant)
        .build(&schema)
        .unwrap();

    assert_eq!(registry.len(), 1);
}
