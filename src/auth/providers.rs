//! Contracts for the two hosted backends.
//!
//! The workflow never talks to a concrete service; it holds
//! `Arc<dyn IdentityProvider>` and `Arc<dyn DocumentStore>`. Production
//! wiring injects the REST clients from [`crate::remote`]; tests inject
//! [`crate::auth::memory`] fakes.

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;

use super::error::{ProviderError, StoreError};
use super::types::AccountId;

/// Credential session established by a successful verification.
///
/// The token is only ever exposed to provider implementations; `Debug`
/// redacts it.
#[derive(Clone)]
pub struct Session {
    account_id: AccountId,
    token: SecretString,
}

impl Session {
    #[must_use]
    pub fn new(account_id: AccountId, token: SecretString) -> Self {
        Self { account_id, token }
    }

    #[must_use]
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account_id", &self.account_id)
            .field("token", &"***")
            .finish()
    }
}

/// External service issuing and verifying account credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a credential and return the new account id.
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccountId, ProviderError>;

    /// Verify a credential and establish a session.
    async fn verify_credential(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, ProviderError>;

    /// Revoke an established session.
    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError>;
}

/// External keyed, schemaless record storage over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a record, replacing any existing document under `key`.
    async fn write(&self, collection: &str, key: &str, record: Value) -> Result<(), StoreError>;

    /// Fetch a record; `Ok(None)` when the document does not exist.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Merge `changes` into an existing document. Fails with
    /// [`StoreError::NotFound`] when the document is absent.
    async fn update(&self, collection: &str, key: &str, changes: Value) -> Result<(), StoreError>;

    /// Delete a document. Deleting an absent document is a success.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// All `(key, record)` pairs where `field` equals `value`. Ordering is
    /// whatever the backend returns.
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Value)>, StoreError>;
}
