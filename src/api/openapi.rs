use utoipa::OpenApi;

use super::handlers;
use crate::auth::{AccountId, ApprovalStatus, PendingUser};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::register::register,
        handlers::login::login,
        handlers::admin::list_pending,
        handlers::admin::approve,
        handlers::admin::reject,
    ),
    components(schemas(
        AccountId,
        ApprovalStatus,
        PendingUser,
        handlers::health::Health,
        handlers::register::RegisterRequest,
        handlers::register::RegisterResponse,
        handlers::login::LoginRequest,
        handlers::login::LoginResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration and login"),
        (name = "admin", description = "Approval triage")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/v1/auth/register",
            "/v1/auth/login",
            "/v1/admin/users/pending",
            "/v1/admin/users/{id}/approve",
            "/v1/admin/users/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
