use axum::{
    http::{header::HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::GIT_COMMIT_HASH;

#[derive(Serialize, ToSchema)]
pub struct Health {
    name: String,
    version: String,
    build: String,
}

/// Liveness probe with build identity.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = Health)
    )
)]
pub async fn health() -> impl IntoResponse {
    let health = Health {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: GIT_COMMIT_HASH.to_string(),
    };

    let app = format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        GIT_COMMIT_HASH
    );

    let mut response = (StatusCode::OK, Json(health)).into_response();
    if let Ok(value) = HeaderValue::from_str(&app) {
        response.headers_mut().insert("x-app", value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_reports_ok_and_app_header() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let app = response
            .headers()
            .get("x-app")
            .and_then(|val| val.to_str().ok())
            .unwrap_or_default();
        assert!(app.starts_with(env!("CARGO_PKG_NAME")));
    }
}
