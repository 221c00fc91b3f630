use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::auth::{ApprovalStatus, AuthError, ProviderError};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub status: ApprovalStatus,
    pub message: String,
}

/// Verify a credential and gate the result on the approval flag.
///
/// Pending and denied accounts get their session revoked and a 403; only
/// approved accounts keep a usable session.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Approved account, session active", body = LoginResponse),
        (status = 400, description = "Missing payload or empty field"),
        (status = 401, description = "Credential rejected"),
        (status = 403, description = "Account pending or denied", body = LoginResponse),
        (status = 502, description = "Backend failure")
    )
)]
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload").into_response();
    };

    let password = SecretString::from(request.password);
    match state.authenticator().login(&request.email, &password).await {
        Ok(status) => status_response(status),
        Err(err) => login_error(&err),
    }
}

fn status_response(status: ApprovalStatus) -> Response {
    let (code, message) = match status {
        ApprovalStatus::Approved => (StatusCode::OK, "Login successful"),
        ApprovalStatus::Pending => (
            StatusCode::FORBIDDEN,
            "Your account status is not determined yet",
        ),
        ApprovalStatus::Denied => (StatusCode::FORBIDDEN, "Your account is not approved yet"),
    };

    (
        code,
        Json(LoginResponse {
            status,
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn login_error(err: &AuthError) -> Response {
    match err {
        AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, (*msg).to_string()),
        AuthError::Provider(ProviderError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, "Login failed".to_string())
        }
        AuthError::Provider(_) => {
            error!("login failed: {err}");
            (StatusCode::BAD_GATEWAY, "Login failed".to_string())
        }
        AuthError::Store(store_err) => {
            error!("approval check failed: {store_err}");
            (
                StatusCode::BAD_GATEWAY,
                format!("Error checking approval: {store_err}"),
            )
        }
    }
    .into_response()
}
