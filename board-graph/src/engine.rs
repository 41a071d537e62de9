//! Resolution engine: a depth-first walk of the requested selection.
//!
//! Each requested field is looked up in the registry for the current value's
//! type and either handed to its resolver or read directly off the parent.
//! Object results are descended into with the field's sub-selection; lists
//! apply the same sub-selection to every element. Siblings of a query
//! selection run concurrently; the root fields of a mutation run one after
//! another, so a write finishes before anything beneath it is resolved.
//! The first failure anywhere aborts the operation.

use std::sync::Arc;

use board_auth::AuthContext;
use board_core::Store;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{GraphError, GraphResult};
use crate::operation::{Operation, OperationKind};
use crate::registry::ResolverRegistry;
use crate::resolver::ResolveContext;
use crate::resolvers::job_board_registry;
use crate::schema::{FieldDef, OutputType, Schema, TypeTag};
use crate::selection::{Arguments, Field};
use crate::value::{Node, Resolved};

const TYPENAME: &str = "__typename";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Siblings {
    Concurrent,
    Serial,
}

/// Per-operation state shared by every step of the walk.
struct Walk<'a> {
    ctx: ResolveContext<'a>,
    variables: &'a Arguments,
}

pub struct ResolutionEngine {
    schema: Arc<Schema>,
    registry: Arc<ResolverRegistry>,
    store: Store,
}

impl ResolutionEngine {
    pub fn new(schema: Arc<Schema>, registry: Arc<ResolverRegistry>, store: Store) -> Self {
        Self {
            schema,
            registry,
            store,
        }
    }

    /// Engine over the job board schema with every built-in resolver.
    pub fn job_board(store: Store) -> GraphResult<Self> {
        let schema = Schema::job_board();
        let registry = job_board_registry(&schema)?;
        Ok(Self::new(Arc::new(schema), Arc::new(registry), store))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Resolve `operation` on behalf of `auth` into a response tree.
    #[instrument(
        name = "resolve",
        skip_all,
        fields(operation = %operation.display_name(), kind = ?operation.kind)
    )]
    pub async fn resolve(&self, operation: &Operation, auth: &AuthContext) -> GraphResult<Value> {
        let walk = Walk {
            ctx: ResolveContext {
                store: &self.store,
                auth,
            },
            variables: &operation.variables,
        };

        let (root, siblings) = match operation.kind {
            OperationKind::Query => (Node::Query, Siblings::Concurrent),
            OperationKind::Mutation => (Node::Mutation, Siblings::Serial),
        };

        match self
            .resolve_selection(&root, &operation.selection, &walk, siblings)
            .await
        {
            Ok(tree) => {
                debug!("resolved");
                Ok(Value::Object(tree))
            }
            Err(err) => {
                debug!(error = %err, "resolution failed");
                Err(err)
            }
        }
    }

    fn resolve_selection<'a>(
        &'a self,
        node: &'a Node,
        selection: &'a [Field],
        walk: &'a Walk<'a>,
        siblings: Siblings,
    ) -> BoxFuture<'a, GraphResult<Map<String, Value>>> {
        async move {
            let mut tree = Map::new();
            match siblings {
                Siblings::Concurrent => {
                    let entries =
                        try_join_all(selection.iter().map(|f| self.resolve_field(node, f, walk)))
                            .await?;
                    tree.extend(entries);
                }
                Siblings::Serial => {
                    for f in selection {
                        let (key, value) = self.resolve_field(node, f, walk).await?;
                        tree.insert(key, value);
                    }
                }
            }
            Ok(tree)
        }
        .boxed()
    }

    async fn resolve_field<'a>(
        &'a self,
        node: &'a Node,
        field: &'a Field,
        walk: &'a Walk<'a>,
    ) -> GraphResult<(String, Value)> {
        let key = field.response_key().to_string();
        let ty = node.type_tag();

        if field.name == TYPENAME {
            return Ok((key, Value::String(ty.name().to_string())));
        }

        let def = self.schema.field(ty, &field.name).ok_or_else(|| {
            GraphError::resolution(format!(
                "Cannot query field \"{}\" on type \"{ty}\"",
                field.name
            ))
        })?;

        let args = field.bind_arguments(walk.variables);
        if let Some(missing) = def.required_args.iter().find(|a| !args.has(a)) {
            return Err(GraphError::resolution(format!(
                "Field \"{ty}.{}\" argument \"{missing}\" is required",
                def.name
            )));
        }

        let resolved = match self.registry.lookup(ty, &field.name) {
            Some(resolver) => resolver.resolve(node, &args, &walk.ctx).await,
            None => node.property(&field.name).map(Resolved::from).ok_or_else(|| {
                GraphError::resolution(format!(
                    "No resolver or property for field \"{ty}.{}\"",
                    field.name
                ))
            }),
        };

        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(err) if err.is_not_found() && def.nullable => Resolved::Null,
            Err(err) if err.is_not_found() => {
                return Err(GraphError::resolution(format!(
                    "Cannot return null for non-nullable field \"{ty}.{}\": {err}",
                    def.name
                )))
            }
            Err(err) => return Err(err),
        };

        let value = self.complete(ty, def, field, resolved, walk).await?;
        Ok((key, value))
    }

    /// Shape a resolved value according to its declaration and sub-selection.
    fn complete<'a>(
        &'a self,
        parent: TypeTag,
        def: &'a FieldDef,
        field: &'a Field,
        resolved: Resolved,
        walk: &'a Walk<'a>,
    ) -> BoxFuture<'a, GraphResult<Value>> {
        async move {
            match resolved {
                Resolved::Null if def.nullable => Ok(Value::Null),
                Resolved::Null => Err(GraphError::resolution(format!(
                    "Cannot return null for non-nullable field \"{parent}.{}\"",
                    def.name
                ))),
                Resolved::List(items) if def.list => {
                    let values = try_join_all(
                        items
                            .into_iter()
                            .map(|item| self.complete_item(parent, def, field, item, walk)),
                    )
                    .await?;
                    Ok(Value::Array(values))
                }
                Resolved::List(_) => Err(GraphError::resolution(format!(
                    "Field \"{parent}.{}\" returned a list for a single value",
                    def.name
                ))),
                Resolved::Object(_) if def.list => Err(GraphError::resolution(format!(
                    "Field \"{parent}.{}\" expected a list",
                    def.name
                ))),
                Resolved::Object(node) => self.complete_object(parent, def, field, node, walk).await,
                Resolved::Scalar(value) => {
                    if def.is_object() {
                        return Err(GraphError::resolution(format!(
                            "Field \"{parent}.{}\" resolved to a scalar for an object type",
                            def.name
                        )));
                    }
                    if !field.selection.is_empty() {
                        return Err(GraphError::resolution(format!(
                            "Field \"{parent}.{}\" must not have a selection since it is a scalar",
                            def.name
                        )));
                    }
                    Ok(value)
                }
            }
        }
        .boxed()
    }

    /// One list element. Elements are never null.
    async fn complete_item<'a>(
        &'a self,
        parent: TypeTag,
        def: &'a FieldDef,
        field: &'a Field,
        item: Resolved,
        walk: &'a Walk<'a>,
    ) -> GraphResult<Value> {
        match item {
            Resolved::Object(node) => self.complete_object(parent, def, field, node, walk).await,
            Resolved::Scalar(value) if !def.is_object() => Ok(value),
            _ => Err(GraphError::resolution(format!(
                "Field \"{parent}.{}\" returned an invalid list element",
                def.name
            ))),
        }
    }

    async fn complete_object<'a>(
        &'a self,
        parent: TypeTag,
        def: &'a FieldDef,
        field: &'a Field,
        node: Node,
        walk: &'a Walk<'a>,
    ) -> GraphResult<Value> {
        if def.output != OutputType::Object(node.type_tag()) {
            return Err(GraphError::resolution(format!(
                "Field \"{parent}.{}\" resolved to a {}",
                def.name,
                node.type_tag()
            )));
        }
        if field.selection.is_empty() {
            return Err(GraphError::resolution(format!(
                "Field \"{parent}.{}\" of type \"{}\" must have a selection of subfields",
                def.name,
                node.type_tag()
            )));
        }

        let tree = self
            .resolve_selection(&node, &field.selection, walk, Siblings::Concurrent)
            .await?;
        Ok(Value::Object(tree))
    }
}
