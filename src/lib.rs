//! # Aprobi (Approval-Gated Authentication)
//!
//! `aprobi` fronts a hosted identity provider and a hosted document store
//! with a small approval workflow: accounts are registered, triaged by an
//! operator, and only approved accounts may log in.
//!
//! ## Approval Pipeline
//!
//! Every account moves through a linear pipeline:
//!
//! 1. **Register** — a credential is created with the identity provider and a
//!    profile record `{email, approved: false}` is written to the document
//!    store, keyed by the new account id.
//! 2. **Triage** — an operator lists pending profiles and either approves
//!    (flips `approved` to `true`) or rejects (deletes the profile record).
//! 3. **Login** — a verified credential is admitted only when its profile
//!    record carries `approved: true`. Pending and denied logins have their
//!    just-established session revoked.
//!
//! ## Consistency
//!
//! Registration is two remote calls with no transaction between them. A
//! profile write that fails after credential creation leaves a usable
//! credential with no profile; such accounts classify as *pending* at login
//! (an absent record is indistinguishable from "not yet approved").
//! Rejection deletes the profile record only; the underlying credential
//! account is left untouched.
//!
//! Both backends are consumed through traits ([`auth::IdentityProvider`] and
//! [`auth::DocumentStore`]), so the entire workflow runs against in-memory
//! fakes in tests.

pub mod api;
pub mod auth;
pub mod cli;
pub mod remote;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
