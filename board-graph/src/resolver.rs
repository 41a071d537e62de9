use async_trait::async_trait;
use board_auth::AuthContext;
use board_core::Store;

use crate::error::GraphResult;
use crate::selection::Arguments;
use crate::value::{Node, Resolved};

/// Everything a resolver may consult besides its parent and arguments.
pub struct ResolveContext<'a> {
    pub store: &'a Store,
    pub auth: &'a AuthContext,
}

/// Produces the value of one field given its parent value and arguments.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(
        &self,
        parent: &Node,
        args: &Arguments,
        ctx: &ResolveContext<'_>,
    ) -> GraphResult<Resolved>;
}
