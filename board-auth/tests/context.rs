use std::sync::Arc;

use board_auth::{derive_context, AuthContext};
use board_core::{Collection, MemoryCollection, User};

fn users() -> Arc<dyn Collection<User>> {
    Arc::new(MemoryCollection::from_records(vec![User {
        id: "u1".to_string(),
        email: "alice@acme.test".to_string(),
        password: "alice".to_string(),
        company_id: "c1".to_string(),
    }]))
}

#[tokio::test]
async fn no_principal_is_anonymous() {
    let ctx = derive_context(users().as_ref(), None).await.unwrap();

    assert_eq!(ctx, AuthContext::anonymous());
    assert!(!ctx.is_authenticated());
    assert!(ctx.company_id().is_none());
}

#[tokio::test]
async fn known_principal_carries_its_company() {
    let ctx = derive_context(users().as_ref(), Some("u1")).await.unwrap();

    assert!(ctx.is_authenticated());
    assert_eq!(ctx.user().unwrap().email, "alice@acme.test");
    assert_eq!(ctx.company_id(), Some("c1"));
}

#[tokio::test]
async fn stale_principal_fails_open_to_anonymous() {
    let ctx = derive_context(users().as_ref(), Some("deleted-user")).await.unwrap();

    assert!(!ctx.is_authenticated());
}
