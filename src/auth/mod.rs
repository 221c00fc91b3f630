//! Approval-gated authentication workflow.
//!
//! Three components wrap the two remote backends:
//!
//! - [`AccountRegistrar`] creates a credential and writes the initial
//!   unapproved profile record.
//! - [`SessionAuthenticator`] verifies a credential and gates entry on the
//!   profile's `approved` flag.
//! - [`ApprovalAdministrator`] lists pending profiles and approves or
//!   rejects them.
//!
//! The backends are injected as `Arc<dyn IdentityProvider>` and
//! `Arc<dyn DocumentStore>`; [`memory`] provides in-memory implementations
//! with call counters for tests.

mod administrator;
mod authenticator;
mod error;
pub mod memory;
mod providers;
mod registrar;
mod types;
mod utils;

pub use administrator::ApprovalAdministrator;
pub use authenticator::SessionAuthenticator;
pub use error::{AuthError, ProviderError, StoreError};
pub use providers::{DocumentStore, IdentityProvider, Session};
pub use registrar::AccountRegistrar;
pub use types::{AccountId, ApprovalStatus, PendingUser, ProfileRecord};

/// Document store collection holding one profile record per account.
pub const USERS_COLLECTION: &str = "users";

/// Profile field gating login. Absent on malformed records; absence
/// classifies as pending.
pub const APPROVED_FIELD: &str = "approved";
