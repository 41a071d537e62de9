use board_core::{Company, Job, User};
use serde_json::Value;

use crate::schema::TypeTag;

/// A typed value the engine can select fields from.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Query,
    Mutation,
    Job(Job),
    Company(Company),
    User(User),
}

impl Node {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Node::Query => TypeTag::Query,
            Node::Mutation => TypeTag::Mutation,
            Node::Job(_) => TypeTag::Job,
            Node::Company(_) => TypeTag::Company,
            Node::User(_) => TypeTag::User,
        }
    }

    /// Stored property `name`, read off the record's serialized form.
    ///
    /// Root nodes have no properties.
    pub fn property(&self, name: &str) -> Option<Value> {
        let value = match self {
            Node::Query | Node::Mutation => return None,
            Node::Job(job) => serde_json::to_value(job),
            Node::Company(company) => serde_json::to_value(company),
            Node::User(user) => serde_json::to_value(user),
        }
        .ok()?;

        match value {
            Value::Object(mut map) => map.remove(name),
            _ => None,
        }
    }
}

impl From<Job> for Node {
    fn from(job: Job) -> Self {
        Node::Job(job)
    }
}

impl From<Company> for Node {
    fn from(company: Company) -> Self {
        Node::Company(company)
    }
}

impl From<User> for Node {
    fn from(user: User) -> Self {
        Node::User(user)
    }
}

/// What a resolver produced for one field, before sub-selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Null,
    Scalar(Value),
    Object(Node),
    List(Vec<Resolved>),
}

impl Resolved {
    pub fn object(node: impl Into<Node>) -> Self {
        Resolved::Object(node.into())
    }

    pub fn list<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Resolved::List(nodes.into_iter().map(Resolved::object).collect())
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Resolved::Null,
            other => Resolved::Scalar(other),
        }
    }
}
