//! Field selections and arguments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GraphError, GraphResult};

/// Concrete argument values handed to a resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Present and not null.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn require(&self, name: &str) -> GraphResult<&Value> {
        self.get(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| GraphError::resolution(format!("missing required argument `{name}`")))
    }

    pub fn require_str(&self, name: &str) -> GraphResult<&str> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| GraphError::resolution(format!("argument `{name}` must be a string")))
    }

    pub fn require_object(&self, name: &str) -> GraphResult<&Map<String, Value>> {
        self.require(name)?
            .as_object()
            .ok_or_else(|| GraphError::resolution(format!("argument `{name}` must be an object")))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An argument as written in a selection: a literal, or a reference to one of
/// the operation's variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Variable {
        #[serde(rename = "$var")]
        var: String,
    },
    Literal(Value),
}

/// One requested field and what to select beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, InputValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<Field>,
}

/// Shorthand for [`Field::new`].
pub fn field(name: impl Into<String>) -> Field {
    Field::new(name)
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: BTreeMap::new(),
            selection: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Literal argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments
            .insert(name.into(), InputValue::Literal(value.into()));
        self
    }

    /// Argument bound to the operation variable `var`.
    pub fn var(mut self, name: impl Into<String>, var: impl Into<String>) -> Self {
        self.arguments
            .insert(name.into(), InputValue::Variable { var: var.into() });
        self
    }

    pub fn select<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        self.selection.extend(fields);
        self
    }

    /// Key of this field in the response tree.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Substitute variables. An unbound variable leaves the argument absent.
    pub fn bind_arguments(&self, variables: &Arguments) -> Arguments {
        self.arguments
            .iter()
            .filter_map(|(name, input)| {
                let value = match input {
                    InputValue::Literal(v) => v.clone(),
                    InputValue::Variable { var } => variables.get(var)?.clone(),
                };
                Some((name.clone(), value))
            })
            .collect()
    }
}
