//! board-core: records, store collaborator and structured errors for the job board.

pub mod config;
pub mod errors;
pub mod model;
pub mod store;

pub use config::{BoardConfig, BoardConfigSnapshot};
pub use errors::{BoardError, ErrorKind};
pub use model::{Company, Job, Record, User};
pub use store::{Collection, MemoryCollection, Store};
