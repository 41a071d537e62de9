//! Declared schema graph.
//!
//! Object types are a closed set of tags; each declares its fields with an
//! output type, list-ness, nullability and required arguments. The registry
//! is checked against this declaration when it is built, so a lookup at
//! resolution time never meets an unknown (type, field) pair.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Object types of the job board graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Query,
    Mutation,
    Job,
    Company,
    User,
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Query => "Query",
            TypeTag::Mutation => "Mutation",
            TypeTag::Job => "Job",
            TypeTag::Company => "Company",
            TypeTag::User => "User",
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, TypeTag::Query | TypeTag::Mutation)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Scalar,
    Object(TypeTag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub output: OutputType,
    pub list: bool,
    pub nullable: bool,
    pub required_args: Vec<&'static str>,
}

impl FieldDef {
    /// Nullable scalar field.
    pub fn scalar(name: &'static str) -> Self {
        Self {
            name,
            output: OutputType::Scalar,
            list: false,
            nullable: true,
            required_args: Vec::new(),
        }
    }

    /// Nullable object field.
    pub fn object(name: &'static str, ty: TypeTag) -> Self {
        Self {
            output: OutputType::Object(ty),
            ..Self::scalar(name)
        }
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn arg(mut self, name: &'static str) -> Self {
        self.required_args.push(name);
        self
    }

    pub fn is_object(&self) -> bool {
        matches!(self.output, OutputType::Object(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: HashMap<TypeTag, Vec<FieldDef>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) an object type.
    pub fn object(mut self, ty: TypeTag, fields: Vec<FieldDef>) -> Self {
        self.types.insert(ty, fields);
        self
    }

    pub fn has_type(&self, ty: TypeTag) -> bool {
        self.types.contains_key(&ty)
    }

    pub fn field(&self, ty: TypeTag, name: &str) -> Option<&FieldDef> {
        self.types.get(&ty)?.iter().find(|f| f.name == name)
    }

    pub fn fields(&self, ty: TypeTag) -> impl Iterator<Item = &FieldDef> {
        self.types.get(&ty).into_iter().flatten()
    }

    pub fn types(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.types.keys().copied()
    }

    /// ```text
    /// type Query    { jobs: [Job!]!  job(id: ID!): Job  company(id: ID!): Company }
    /// type Mutation { createJob(input: CreateJobInput!): Job! }
    /// type Job      { id: ID!  title: String  description: String  company: Company! }
    /// type Company  { id: ID!  name: String  description: String  jobs: [Job!]! }
    /// type User     { id: ID!  email: String  companyId: ID! }
    /// ```
    pub fn job_board() -> Self {
        Self::new()
            .object(
                TypeTag::Query,
                vec![
                    FieldDef::object("jobs", TypeTag::Job).list().non_null(),
                    FieldDef::object("job", TypeTag::Job).arg("id"),
                    FieldDef::object("company", TypeTag::Company).arg("id"),
                ],
            )
            .object(
                TypeTag::Mutation,
                vec![FieldDef::object("createJob", TypeTag::Job)
                    .arg("input")
                    .non_null()],
            )
            .object(
                TypeTag::Job,
                vec![
                    FieldDef::scalar("id").non_null(),
                    FieldDef::scalar("title"),
                    FieldDef::scalar("description"),
                    FieldDef::object("company", TypeTag::Company).non_null(),
                ],
            )
            .object(
                TypeTag::Company,
                vec![
                    FieldDef::scalar("id").non_null(),
                    FieldDef::scalar("name"),
                    FieldDef::scalar("description"),
                    FieldDef::object("jobs", TypeTag::Job).list().non_null(),
                ],
            )
            .object(
                TypeTag::User,
                vec![
                    FieldDef::scalar("id").non_null(),
                    FieldDef::scalar("email"),
                    FieldDef::scalar("companyId").non_null(),
                ],
            )
    }
}
