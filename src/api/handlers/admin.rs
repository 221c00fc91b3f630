//! Admin triage endpoints over the pending-user queue.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use std::sync::Arc;
use tracing::error;

use crate::api::AppState;
use crate::auth::{AccountId, AuthError, StoreError};

/// List accounts still waiting for a decision.
#[utoipa::path(
    get,
    path = "/v1/admin/users/pending",
    tag = "admin",
    responses(
        (status = 200, description = "Pending accounts", body = [crate::auth::PendingUser]),
        (status = 502, description = "Backend failure")
    )
)]
pub async fn list_pending(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.administrator().list_pending().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(err) => {
            error!("pending list failed: {err}");
            (StatusCode::BAD_GATEWAY, "Could not list pending users").into_response()
        }
    }
}

/// Flip an account's `approved` flag to true.
#[utoipa::path(
    post,
    path = "/v1/admin/users/{id}/approve",
    tag = "admin",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account approved"),
        (status = 404, description = "No profile record for this id"),
        (status = 502, description = "Backend failure")
    )
)]
pub async fn approve(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.administrator().approve(&AccountId::new(id.as_str())).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(AuthError::Store(StoreError::NotFound { .. })) => {
            (StatusCode::NOT_FOUND, "No profile record for this id").into_response()
        }
        Err(err) => {
            error!(account_id = %id, "approve failed: {err}");
            (StatusCode::BAD_GATEWAY, "Could not approve account").into_response()
        }
    }
}

/// Remove an account's profile record.
///
/// Deleting an already-absent record still returns 204; the credential at
/// the identity provider is left in place.
#[utoipa::path(
    delete,
    path = "/v1/admin/users/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 204, description = "Profile record removed"),
        (status = 502, description = "Backend failure")
    )
)]
pub async fn reject(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.administrator().reject(&AccountId::new(id.as_str())).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!(account_id = %id, "reject failed: {err}");
            (StatusCode::BAD_GATEWAY, "Could not reject account").into_response()
        }
    }
}
