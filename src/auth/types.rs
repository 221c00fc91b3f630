//! Core types of the approval pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::APPROVED_FIELD;

/// Opaque account identifier assigned by the identity provider. Doubles as
/// the profile record key in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application-level record tracking a user's approval status.
///
/// Stored schemalessly in the `users` collection; `approved` is the sole
/// access-control gate and always starts `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileRecord {
    pub email: String,
    pub approved: bool,
}

impl ProfileRecord {
    /// New profile awaiting operator triage.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            approved: false,
        }
    }

    /// Document-store representation.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "email": self.email,
            APPROVED_FIELD: self.approved,
        })
    }
}

/// Login classification derived from the profile record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// `approved == true`: grant access.
    Approved,
    /// Record missing or `approved` field absent: not yet triaged.
    Pending,
    /// `approved == false`: operator has not approved the account.
    Denied,
}

/// One row of the administrator's pending list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingUser {
    pub id: AccountId,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_starts_unapproved() {
        let record = ProfileRecord::new("alice@example.com");
        assert!(!record.approved);
        assert_eq!(record.email, "alice@example.com");
    }

    #[test]
    fn profile_document_shape() {
        let document = ProfileRecord::new("alice@example.com").to_document();
        assert_eq!(
            document,
            serde_json::json!({"email": "alice@example.com", "approved": false})
        );
    }

    #[test]
    fn approval_status_serializes_lowercase() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::to_value(ApprovalStatus::Approved)?,
            serde_json::json!("approved")
        );
        assert_eq!(
            serde_json::to_value(ApprovalStatus::Pending)?,
            serde_json::json!("pending")
        );
        assert_eq!(
            serde_json::to_value(ApprovalStatus::Denied)?,
            serde_json::json!("denied")
        );
        Ok(())
    }

    #[test]
    fn account_id_is_transparent_in_json() -> anyhow::Result<()> {
        let user = PendingUser {
            id: AccountId::new("uid-1"),
            email: "bob@example.com".to_string(),
        };
        let value = serde_json::to_value(&user)?;
        assert_eq!(value["id"], serde_json::json!("uid-1"));
        Ok(())
    }
}
