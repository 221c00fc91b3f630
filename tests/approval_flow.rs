//! End-to-end workflow tests over the in-memory backends: register, triage
//! and login against the same pair of fakes, the way the three components
//! share backends in production.

use aprobi::auth::memory::{InMemoryDocumentStore, InMemoryIdentityProvider};
use aprobi::auth::{
    AccountRegistrar, ApprovalAdministrator, ApprovalStatus, AuthError, DocumentStore,
    SessionAuthenticator, USERS_COLLECTION,
};
use secrecy::SecretString;
use std::sync::Arc;

struct World {
    identity: Arc<InMemoryIdentityProvider>,
    store: Arc<InMemoryDocumentStore>,
    registrar: AccountRegistrar,
    authenticator: SessionAuthenticator,
    administrator: ApprovalAdministrator,
}

fn world() -> World {
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let store = Arc::new(InMemoryDocumentStore::new());
    World {
        registrar: AccountRegistrar::new(identity.clone(), store.clone()),
        authenticator: SessionAuthenticator::new(identity.clone(), store.clone()),
        administrator: ApprovalAdministrator::new(store.clone()),
        identity,
        store,
    }
}

fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[tokio::test]
async fn fresh_registration_is_denied_and_holds_no_session() -> anyhow::Result<()> {
    let world = world();

    world
        .registrar
        .register("alice@example.com", &password("hunter22"))
        .await?;

    let status = world
        .authenticator
        .login("alice@example.com", &password("hunter22"))
        .await?;

    // A fresh profile record carries an explicit `approved: false`, which
    // classifies as denied; only an absent record or field is pending.
    assert_eq!(status, ApprovalStatus::Denied);
    assert!(!world.identity.has_active_sessions().await);
    Ok(())
}

#[tokio::test]
async fn approved_account_logs_in() -> anyhow::Result<()> {
    let world = world();

    let id = world
        .registrar
        .register("alice@example.com", &password("hunter22"))
        .await?;
    world.administrator.approve(&id).await?;

    let status = world
        .authenticator
        .login("alice@example.com", &password("hunter22"))
        .await?;

    assert_eq!(status, ApprovalStatus::Approved);
    assert!(world.identity.has_active_sessions().await);
    Ok(())
}

#[tokio::test]
async fn rejected_account_falls_back_to_pending() -> anyhow::Result<()> {
    let world = world();

    let id = world
        .registrar
        .register("alice@example.com", &password("hunter22"))
        .await?;
    world.administrator.reject(&id).await?;

    // The profile record is gone; the credential still verifies, and an
    // absent record classifies as pending, not denied.
    assert!(world
        .store
        .get(USERS_COLLECTION, id.as_str())
        .await?
        .is_none());

    let status = world
        .authenticator
        .login("alice@example.com", &password("hunter22"))
        .await?;
    assert_eq!(status, ApprovalStatus::Pending);
    assert!(!world.identity.has_active_sessions().await);
    Ok(())
}

#[tokio::test]
async fn triage_queue_tracks_decisions() -> anyhow::Result<()> {
    let world = world();

    let alice = world
        .registrar
        .register("alice@example.com", &password("hunter22"))
        .await?;
    let bob = world
        .registrar
        .register("bob@example.com", &password("hunter22"))
        .await?;

    let pending = world.administrator.list_pending().await?;
    assert_eq!(pending.len(), 2);

    world.administrator.approve(&alice).await?;
    world.administrator.reject(&bob).await?;

    let pending = world.administrator.list_pending().await?;
    assert!(pending.is_empty());

    assert_eq!(
        world
            .authenticator
            .login("alice@example.com", &password("hunter22"))
            .await?,
        ApprovalStatus::Approved
    );
    Ok(())
}

#[tokio::test]
async fn approve_twice_is_idempotent() -> anyhow::Result<()> {
    let world = world();

    let id = world
        .registrar
        .register("alice@example.com", &password("hunter22"))
        .await?;
    world.administrator.approve(&id).await?;
    world.administrator.approve(&id).await?;

    assert_eq!(
        world
            .authenticator
            .login("alice@example.com", &password("hunter22"))
            .await?,
        ApprovalStatus::Approved
    );
    Ok(())
}

#[tokio::test]
async fn denied_account_is_signed_out() -> anyhow::Result<()> {
    let world = world();

    let id = world
        .registrar
        .register("alice@example.com", &password("hunter22"))
        .await?;

    // Flip the flag to an explicit false, the shape an operator tool that
    // marks accounts denied instead of deleting them would leave behind.
    world
        .store
        .update(
            USERS_COLLECTION,
            id.as_str(),
            serde_json::json!({ "approved": false }),
        )
        .await?;

    let status = world
        .authenticator
        .login("alice@example.com", &password("hunter22"))
        .await?;
    assert_eq!(status, ApprovalStatus::Denied);
    assert!(!world.identity.has_active_sessions().await);
    Ok(())
}

#[tokio::test]
async fn empty_input_never_reaches_the_backends() -> anyhow::Result<()> {
    let world = world();

    let err = world
        .registrar
        .register("", &password("hunter22"))
        .await
        .expect_err("empty email must fail");
    assert!(matches!(err, AuthError::Validation(_)));

    let err = world
        .authenticator
        .login("alice@example.com", &password(""))
        .await
        .expect_err("empty password must fail");
    assert!(matches!(err, AuthError::Validation(_)));

    assert_eq!(world.identity.remote_calls(), 0);
    assert_eq!(world.store.remote_calls(), 0);
    Ok(())
}
