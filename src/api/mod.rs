//! HTTP surface: router, middleware, and server startup.

use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{
    AccountRegistrar, ApprovalAdministrator, DocumentStore, IdentityProvider,
    SessionAuthenticator,
};

pub mod handlers;
mod openapi;

pub use openapi::ApiDoc;

/// Shared application state: the three workflow components over one pair
/// of injected backends.
pub struct AppState {
    registrar: AccountRegistrar,
    authenticator: SessionAuthenticator,
    administrator: ApprovalAdministrator,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            registrar: AccountRegistrar::new(identity.clone(), store.clone()),
            authenticator: SessionAuthenticator::new(identity, store.clone()),
            administrator: ApprovalAdministrator::new(store),
        }
    }

    #[must_use]
    pub fn registrar(&self) -> &AccountRegistrar {
        &self.registrar
    }

    #[must_use]
    pub fn authenticator(&self) -> &SessionAuthenticator {
        &self.authenticator
    }

    #[must_use]
    pub fn administrator(&self) -> &ApprovalAdministrator {
        &self.administrator
    }
}

/// Build the application router with all routes and layers.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/v1/auth/register", post(handlers::register::register))
        .route("/v1/auth/login", post(handlers::login::login))
        .route(
            "/v1/admin/users/pending",
            get(handlers::admin::list_pending),
        )
        .route("/v1/admin/users/:id/approve", post(handlers::admin::approve))
        .route("/v1/admin/users/:id", delete(handlers::admin::reject))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server.
/// # Errors
/// Return error if failed to bind the port or the server stops abnormally.
pub async fn new(port: u16, state: Arc<AppState>) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
