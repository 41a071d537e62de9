// Per-operation authorization context.

use anyhow::Result;
use board_core::{Collection, User};
use tracing::{debug, warn};

/// Who is performing an operation.
///
/// Built once per inbound operation, before resolution begins, and handed to
/// resolvers by shared reference. It cannot be modified after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Company the acting principal belongs to.
    pub fn company_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.company_id.as_str())
    }
}

/// Resolve a verified principal id into an [`AuthContext`].
///
/// An id that no longer matches a user yields an anonymous context rather
/// than an error. Store failures are propagated.
pub async fn derive_context(
    users: &dyn Collection<User>,
    principal_id: Option<&str>,
) -> Result<AuthContext> {
    let Some(principal_id) = principal_id else {
        return Ok(AuthContext::anonymous());
    };

    match users.get(principal_id).await? {
        Some(user) => {
            debug!(user = %user.id, company = %user.company_id, "authenticated principal");
            Ok(AuthContext::authenticated(user))
        }
        None => {
            warn!(principal = %principal_id, "principal does not match a user, continuing anonymously");
            Ok(AuthContext::anonymous())
        }
    }
}
