use serde::{Deserialize, Serialize};

use crate::selection::{Arguments, Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named read or write against the graph, with its variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Arguments::is_empty")]
    pub variables: Arguments,
    pub selection: Vec<Field>,
}

impl Operation {
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, Some(name.into()))
    }

    pub fn mutation(name: impl Into<String>) -> Self {
        Self::new(OperationKind::Mutation, Some(name.into()))
    }

    /// Unnamed operation, e.g. `{ jobs { id } }`.
    pub fn anonymous(kind: OperationKind) -> Self {
        Self::new(kind, None)
    }

    fn new(kind: OperationKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            variables: Arguments::new(),
            selection: Vec::new(),
        }
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn select<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        self.selection.extend(fields);
        self
    }

    /// Name used in logs and cache keys; anonymous operations fall back to
    /// their root field names.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .selection
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}
