//! board-graph: schema, resolver registry and resolution engine.
//!
//! ```rust,no_run
//! use board_auth::AuthContext;
//! use board_core::Store;
//! use board_graph::{field, Operation, ResolutionEngine};
//!
//! # async fn run() -> board_graph::GraphResult<()> {
//! let engine = ResolutionEngine::job_board(Store::memory())?;
//! let op = Operation::query("Jobs").select([field("jobs").select([field("id"), field("title")])]);
//! let tree = engine.resolve(&op, &AuthContext::anonymous()).await?;
//! # let _ = tree;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod operation;
pub mod registry;
pub mod resolver;
pub mod resolvers;
pub mod schema;
pub mod selection;
pub mod value;

pub use engine::ResolutionEngine;
pub use error::{GraphError, GraphResult};
pub use operation::{Operation, OperationKind};
pub use registry::{RegistryBuilder, ResolverRegistry};
pub use resolver::{FieldResolver, ResolveContext};
pub use resolvers::job_board_registry;
pub use schema::{FieldDef, OutputType, Schema, TypeTag};
pub use selection::{field, Arguments, Field, InputValue};
pub use value::{Node, Resolved};
