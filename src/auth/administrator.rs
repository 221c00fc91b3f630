//! Operator triage of pending accounts.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use super::error::AuthError;
use super::providers::DocumentStore;
use super::types::{AccountId, PendingUser};
use super::{APPROVED_FIELD, USERS_COLLECTION};

/// Lists unapproved profiles and resolves each one: approve flips the flag,
/// reject deletes the record.
///
/// Every action is a single remote mutation with no coordination between
/// concurrent operators; a list fetched by one operator may contain records
/// another already resolved, and the resulting already-approved or
/// already-deleted mutations are acceptable outcomes. Rejection removes the
/// profile record only, never the identity-provider credential.
pub struct ApprovalAdministrator {
    store: Arc<dyn DocumentStore>,
}

impl ApprovalAdministrator {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All profiles with `approved == false`, in backend order.
    ///
    /// # Errors
    ///
    /// [`AuthError::Store`] when the query fails.
    #[instrument(skip_all)]
    pub async fn list_pending(&self) -> Result<Vec<PendingUser>, AuthError> {
        let rows = self
            .store
            .query_equals(USERS_COLLECTION, APPROVED_FIELD, Value::Bool(false))
            .await?;

        Ok(rows
            .into_iter()
            .map(|(key, document)| PendingUser {
                id: AccountId::new(key),
                email: document
                    .get("email")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect())
    }

    /// Approve the account: set `approved = true`. Idempotent; approving an
    /// already-approved account is a no-op remotely but still succeeds.
    ///
    /// # Errors
    ///
    /// [`AuthError::Store`] when the mutation fails, including
    /// [`super::StoreError::NotFound`] for a record another operator already
    /// rejected.
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn approve(&self, id: &AccountId) -> Result<(), AuthError> {
        self.store
            .update(
                USERS_COLLECTION,
                id.as_str(),
                json!({ APPROVED_FIELD: true }),
            )
            .await?;

        info!("account approved");

        Ok(())
    }

    /// Reject the account: delete its profile record. Deleting an absent
    /// record is a success, so rejection is idempotent in effect. The
    /// identity-provider credential is left untouched.
    ///
    /// # Errors
    ///
    /// [`AuthError::Store`] when the delete fails.
    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn reject(&self, id: &AccountId) -> Result<(), AuthError> {
        self.store.delete(USERS_COLLECTION, id.as_str()).await?;

        info!("account rejected, profile record deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::InMemoryDocumentStore;
    use super::super::{
        AccountId, AuthError, DocumentStore, ProfileRecord, StoreError, USERS_COLLECTION,
    };
    use super::ApprovalAdministrator;
    use std::sync::Arc;

    async fn store_with_profiles() -> anyhow::Result<Arc<InMemoryDocumentStore>> {
        let store = Arc::new(InMemoryDocumentStore::new());
        store
            .write(
                USERS_COLLECTION,
                "uid-pending",
                ProfileRecord::new("pending@example.com").to_document(),
            )
            .await?;
        let mut approved = ProfileRecord::new("approved@example.com");
        approved.approved = true;
        store
            .write(USERS_COLLECTION, "uid-approved", approved.to_document())
            .await?;
        Ok(store)
    }

    #[tokio::test]
    async fn list_pending_returns_only_unapproved() -> anyhow::Result<()> {
        let store = store_with_profiles().await?;
        let administrator = ApprovalAdministrator::new(store);

        let pending = administrator.list_pending().await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, AccountId::new("uid-pending"));
        assert_eq!(pending[0].email, "pending@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn approve_flips_the_flag_and_is_idempotent() -> anyhow::Result<()> {
        let store = store_with_profiles().await?;
        let administrator = ApprovalAdministrator::new(store.clone());
        let id = AccountId::new("uid-pending");

        administrator.approve(&id).await?;
        administrator.approve(&id).await?; // second call still succeeds

        let document = store
            .get(USERS_COLLECTION, "uid-pending")
            .await?
            .expect("record should still exist");
        assert_eq!(document["approved"], true);
        assert!(administrator.list_pending().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn reject_deletes_the_record() -> anyhow::Result<()> {
        let store = store_with_profiles().await?;
        let administrator = ApprovalAdministrator::new(store.clone());
        let id = AccountId::new("uid-pending");

        administrator.reject(&id).await?;
        assert!(store.get(USERS_COLLECTION, "uid-pending").await?.is_none());

        // Idempotent in effect: rejecting again still ends in absence.
        administrator.reject(&id).await?;
        assert!(store.get(USERS_COLLECTION, "uid-pending").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn approve_of_rejected_record_reports_not_found() -> anyhow::Result<()> {
        let store = store_with_profiles().await?;
        let administrator = ApprovalAdministrator::new(store);
        let id = AccountId::new("uid-pending");

        administrator.reject(&id).await?;
        let err = administrator
            .approve(&id)
            .await
            .expect_err("approving a deleted record must fail");
        assert!(matches!(
            err,
            AuthError::Store(StoreError::NotFound { .. })
        ));
        Ok(())
    }
}
