//! In-memory implementations of the backend contracts.
//!
//! These exist for tests and local development: no external dependencies,
//! no durability. State lives in `HashMap`s behind `tokio::sync::RwLock`;
//! every trait method bumps a call counter so tests can assert that local
//! validation failures never reach the "network". The failure knobs
//! (`fail_next_write`, `fail_next_get`) make the non-transactional gaps of
//! the workflow reproducible.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{ProviderError, StoreError};
use super::providers::{DocumentStore, IdentityProvider, Session};
use super::types::AccountId;

// Mirrors the hosted provider's minimum-length rule.
const MIN_PASSWORD_LEN: usize = 6;

struct AccountRecord {
    id: AccountId,
    password: String,
}

/// Identity provider fake: accounts keyed by email, sessions by token.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, AccountRecord>>,
    sessions: RwLock<HashMap<String, AccountId>>,
    calls: AtomicUsize,
}

impl InMemoryIdentityProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait-method invocations so far.
    pub fn remote_calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Whether any credential session is still active.
    pub async fn has_active_sessions(&self) -> bool {
        !self.sessions.read().await.is_empty()
    }

    /// Seed an account directly, bypassing the call counter. Test setup
    /// only.
    pub async fn register_account(&self, email: &str, password: &str) -> AccountId {
        let id = AccountId::new(Uuid::new_v4().to_string());
        self.accounts.write().await.insert(
            email.to_string(),
            AccountRecord {
                id: id.clone(),
                password: password.to_string(),
            },
        );
        id
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccountId, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let password = password.expose_secret();
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(ProviderError::EmailTaken);
        }

        let id = AccountId::new(Uuid::new_v4().to_string());
        accounts.insert(
            email.to_string(),
            AccountRecord {
                id: id.clone(),
                password: password.to_string(),
            },
        );
        Ok(id)
    }

    async fn verify_credential(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let accounts = self.accounts.read().await;
        let record = accounts
            .get(email)
            .filter(|record| record.password == password.expose_secret())
            .ok_or(ProviderError::InvalidCredentials)?;

        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), record.id.clone());

        Ok(Session::new(record.id.clone(), SecretString::from(token)))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        self.sessions
            .write()
            .await
            .remove(session.token().expose_secret());
        Ok(())
    }
}

/// Document store fake: documents keyed by `(collection, key)`.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<(String, String), Value>>,
    calls: AtomicUsize,
    fail_next_write: AtomicBool,
    fail_next_get: AtomicBool,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait-method invocations so far.
    pub fn remote_calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Make the next `write` fail, reproducing the dangling-credential gap.
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::Relaxed);
    }

    /// Make the next `get` fail, reproducing a profile fetch failure.
    pub fn fail_next_get(&self) {
        self.fail_next_get.store(true, Ordering::Relaxed);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn write(&self, collection: &str, key: &str, record: Value) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_next_write.swap(false, Ordering::Relaxed) {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }

        self.documents
            .write()
            .await
            .insert((collection.to_string(), key.to_string()), record);
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_next_get.swap(false, Ordering::Relaxed) {
            return Err(StoreError::Unavailable("injected get failure".to_string()));
        }

        Ok(self
            .documents
            .read()
            .await
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    async fn update(&self, collection: &str, key: &str, changes: Value) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&(collection.to_string(), key.to_string()))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            })?;

        if let (Some(target), Some(fields)) = (document.as_object_mut(), changes.as_object()) {
            for (field, value) in fields {
                target.insert(field.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        // Absent documents delete successfully; rejection is idempotent.
        self.documents
            .write()
            .await
            .remove(&(collection.to_string(), key.to_string()));
        Ok(())
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|((coll, _), document)| {
                coll == collection && document.get(field) == Some(&value)
            })
            .map(|((_, key), document)| (key.clone(), document.clone()))
            .collect())
    }
}
