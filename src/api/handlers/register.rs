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
use crate::auth::{AccountId, AuthError, ProviderError};

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub id: AccountId,
}

/// Create a credential and an unapproved profile record.
///
/// The new account cannot log in until an administrator approves it.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, pending approval", body = RegisterResponse),
        (status = 400, description = "Missing payload or invalid email/password"),
        (status = 409, description = "Email is already in use"),
        (status = 502, description = "Backend failure")
    )
)]
pub async fn register(
    Extension(state): Extension<Arc<AppState>>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload").into_response();
    };

    let password = SecretString::from(request.password);
    match state.registrar().register(&request.email, &password).await {
        Ok(id) => (StatusCode::CREATED, Json(RegisterResponse { id })).into_response(),
        Err(err) => register_error(&err),
    }
}

fn register_error(err: &AuthError) -> Response {
    match err {
        AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, (*msg).to_string()),
        AuthError::Provider(ProviderError::EmailTaken) => (
            StatusCode::CONFLICT,
            "Email is already in use".to_string(),
        ),
        AuthError::Provider(ProviderError::WeakPassword(detail)) => {
            (StatusCode::BAD_REQUEST, detail.clone())
        }
        AuthError::Provider(_) => {
            error!("sign-up failed: {err}");
            (StatusCode::BAD_GATEWAY, "Sign-up failed".to_string())
        }
        AuthError::Store(_) => {
            // The credential exists but the profile record does not; the
            // account stays invisible to the admin list until re-registered
            // or repaired by hand.
            error!("profile write failed after account creation: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "Account created but profile could not be saved".to_string(),
            )
        }
    }
    .into_response()
}
