//! Account registration: credential creation plus the initial profile write.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::error::AuthError;
use super::providers::{DocumentStore, IdentityProvider};
use super::types::{AccountId, ProfileRecord};
use super::utils::{normalize_email, valid_email};
use super::USERS_COLLECTION;

/// Creates an identity-provider credential and writes the unapproved
/// profile record keyed by the new account id.
///
/// The two remote calls are not transactional: a profile-write failure
/// leaves the freshly created credential in place (no rollback) and is
/// surfaced as a [`AuthError::Store`], distinct from a sign-up rejection.
/// Login classifies such record-less accounts as pending.
pub struct AccountRegistrar {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
}

impl AccountRegistrar {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { identity, store }
    }

    /// Register a new account; it starts unapproved and must be triaged by
    /// an operator before it can log in.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] on empty or malformed input (no remote call
    /// is made), [`AuthError::Provider`] when credential creation is
    /// rejected, [`AuthError::Store`] when the profile write fails after the
    /// credential already exists.
    #[instrument(skip_all, fields(email = %email.trim()))]
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccountId, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AuthError::Validation("email must not be empty"));
        }
        if password.expose_secret().is_empty() {
            return Err(AuthError::Validation("password must not be empty"));
        }
        if !valid_email(&email) {
            return Err(AuthError::Validation("invalid email address"));
        }

        let account_id = self.identity.create_account(&email, password).await?;

        let record = ProfileRecord::new(email);
        if let Err(err) = self
            .store
            .write(USERS_COLLECTION, account_id.as_str(), record.to_document())
            .await
        {
            // The credential exists but has no profile; login will classify
            // it as pending until an operator or support intervenes.
            warn!(%account_id, "profile write failed after credential creation: {err}");
            return Err(err.into());
        }

        info!(%account_id, "account registered, awaiting approval");

        Ok(account_id)
    }
}
