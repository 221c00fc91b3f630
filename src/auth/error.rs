//! Error taxonomy for the approval workflow.
//!
//! Three disjoint classes: local validation failures (never reach the
//! network), identity-provider rejections, and document-store failures.
//! Handlers map each class onto its own status code, so a profile-write
//! failure after credential creation stays distinguishable from a plain
//! sign-up rejection.

use thiserror::Error;

/// Identity-provider rejection or transport failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("email is already in use")]
    EmailTaken,
    #[error("password rejected: {0}")]
    WeakPassword(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("identity provider request failed: {0}")]
    Unavailable(String),
}

/// Document-store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{key}")]
    NotFound { collection: String, key: String },
    #[error("document store request failed: {0}")]
    Unavailable(String),
}

/// Top-level error returned by the workflow components.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Detected locally before any remote call is issued.
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::{AuthError, ProviderError, StoreError};

    #[test]
    fn provider_error_messages() {
        assert_eq!(
            ProviderError::EmailTaken.to_string(),
            "email is already in use"
        );
        assert_eq!(
            ProviderError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            ProviderError::WeakPassword("too short".to_string()).to_string(),
            "password rejected: too short"
        );
    }

    #[test]
    fn store_not_found_names_document() {
        let err = StoreError::NotFound {
            collection: "users".to_string(),
            key: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "document not found: users/abc");
    }

    #[test]
    fn auth_error_wraps_transparently() {
        let err = AuthError::from(ProviderError::EmailTaken);
        assert_eq!(err.to_string(), "email is already in use");
        assert!(matches!(err, AuthError::Provider(_)));

        let err = AuthError::Validation("email must not be empty");
        assert_eq!(err.to_string(), "email must not be empty");
    }
}
