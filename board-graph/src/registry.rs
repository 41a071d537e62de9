use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GraphError, GraphResult};
use crate::resolver::FieldResolver;
use crate::schema::{Schema, TypeTag};

/// Collects resolver registrations at startup.
///
/// Nothing is checked until [`RegistryBuilder::build`], which validates the
/// whole set against the schema and freezes it.
#[derive(Default)]
pub struct RegistryBuilder {
    resolvers: HashMap<TypeTag, HashMap<String, Arc<dyn FieldResolver>>>,
    duplicates: Vec<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for `ty.field`.
    pub fn register<S, F>(mut self, ty: TypeTag, field: S, resolver: F) -> Self
    where
        S: Into<String>,
        F: FieldResolver + 'static,
    {
        let field = field.into();
        let by_field = self.resolvers.entry(ty).or_default();
        if by_field.contains_key(&field) {
            self.duplicates.push(format!("{ty}.{field}"));
        }
        by_field.insert(field, Arc::new(resolver));
        self
    }

    /// Check every registration against `schema` and freeze the result.
    ///
    /// Fails on duplicate registrations, on resolvers for undeclared fields,
    /// and on declared fields that cannot fall back to a stored property
    /// (root fields and object-typed fields).
    pub fn build(self, schema: &Schema) -> GraphResult<ResolverRegistry> {
        if let Some(dup) = self.duplicates.first() {
            return Err(GraphError::Configuration(format!(
                "resolver registered twice for {dup}"
            )));
        }

        for (ty, by_field) in &self.resolvers {
            if !schema.has_type(*ty) {
                return Err(GraphError::Configuration(format!(
                    "resolver registered for undeclared type {ty}"
                )));
            }
            for field in by_field.keys() {
                if schema.field(*ty, field).is_none() {
                    return Err(GraphError::Configuration(format!(
                        "resolver registered for undeclared field {ty}.{field}"
                    )));
                }
            }
        }

        for ty in schema.types() {
            for def in schema.fields(ty) {
                let registered = self
                    .resolvers
                    .get(&ty)
                    .is_some_and(|m| m.contains_key(def.name));
                if !registered && (ty.is_root() || def.is_object()) {
                    return Err(GraphError::Configuration(format!(
                        "no resolver for {ty}.{}",
                        def.name
                    )));
                }
            }
        }

        Ok(ResolverRegistry {
            resolvers: self.resolvers,
        })
    }
}

/// Immutable mapping from (type, field) to resolver.
pub struct ResolverRegistry {
    resolvers: HashMap<TypeTag, HashMap<String, Arc<dyn FieldResolver>>>,
}

impl ResolverRegistry {
    /// The custom resolver for `ty.field`, or `None` when the field is read
    /// directly off its parent.
    pub fn lookup(&self, ty: TypeTag, field: &str) -> Option<&Arc<dyn FieldResolver>> {
        self.resolvers.get(&ty)?.get(field)
    }

    pub fn len(&self) -> usize {
        self.resolvers.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
