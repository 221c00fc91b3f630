//! Login: credential verification followed by the approval gate.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::error::AuthError;
use super::providers::{DocumentStore, IdentityProvider};
use super::types::ApprovalStatus;
use super::utils::normalize_email;
use super::{APPROVED_FIELD, USERS_COLLECTION};

/// Verifies a credential and classifies the caller by the `approved` flag
/// of their profile record.
///
/// Pending and denied logins have their just-established session revoked so
/// an unapproved user never keeps an active credential session. When the
/// profile fetch itself fails the session is deliberately left as the
/// provider left it; only a completed classification triggers a sign-out.
pub struct SessionAuthenticator {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
}

impl SessionAuthenticator {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { identity, store }
    }

    /// Authenticate and classify the caller.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] on empty input (no remote call is made),
    /// [`AuthError::Provider`] when the credential is rejected,
    /// [`AuthError::Store`] when the profile fetch fails.
    #[instrument(skip_all, fields(email = %email.trim()))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<ApprovalStatus, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AuthError::Validation("email must not be empty"));
        }
        if password.expose_secret().is_empty() {
            return Err(AuthError::Validation("password must not be empty"));
        }

        let session = self.identity.verify_credential(&email, password).await?;

        let document = self
            .store
            .get(USERS_COLLECTION, session.account_id().as_str())
            .await?;

        let status = classify(document.as_ref());
        match status {
            ApprovalStatus::Approved => {
                info!(account_id = %session.account_id(), "login approved");
            }
            ApprovalStatus::Pending | ApprovalStatus::Denied => {
                // Revoke the session so an unapproved account cannot act on
                // it. The sign-out is fire and forget; a failure here does
                // not change the classification.
                if let Err(err) = self.identity.sign_out(&session).await {
                    error!(account_id = %session.account_id(), "sign-out failed: {err}");
                }
            }
        }

        Ok(status)
    }
}

/// Record missing or `approved` absent: pending. `false`: denied. `true`:
/// approved.
fn classify(document: Option<&Value>) -> ApprovalStatus {
    match document
        .and_then(|doc| doc.get(APPROVED_FIELD))
        .and_then(Value::as_bool)
    {
        Some(true) => ApprovalStatus::Approved,
        Some(false) => ApprovalStatus::Denied,
        None => ApprovalStatus::Pending,
    }
}
