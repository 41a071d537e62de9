// Authorization for the job board: who is acting, and how a bearer token
// becomes a principal id.

pub mod context;
pub mod jwt;
pub mod options;

pub use context::{derive_context, AuthContext};
pub use jwt::JwtVerifier;
pub use options::{JwtAlgorithm, JwtOptions};
