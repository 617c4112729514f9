use crate::api::auth::auth as auth_handlers;
use crate::api::tenants::tenants as tenant_handlers;
use crate::auth::{authenticator, guard};
use crate::health;
use crate::state::AppState;
use crate::tenancy::resolver;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router.
///
/// Every request flows through tenant resolution first, then bearer
/// authentication. Membership enforcement is layered only onto the
/// guarded subtree - health probes, the auth endpoints and the tenant
/// lookup stay outside it.
pub fn build_router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/api/v1/auth/me", get(auth_handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::enforce_tenant_membership,
        ));

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Auth endpoints
        .route("/api/v1/auth/register", post(auth_handlers::register))
        .route("/api/v1/auth/login", post(auth_handlers::login))
        .route("/api/v1/auth/refresh", post(auth_handlers::refresh))
        .route("/api/v1/auth/logout", post(auth_handlers::logout))
        .route(
            "/api/v1/auth/password-reset",
            post(auth_handlers::request_password_reset),
        )
        // Public tenant lookup
        .route(
            "/api/v1/tenants/by-subdomain/{subdomain}",
            get(tenant_handlers::get_by_subdomain),
        )
        // Guarded routes
        .merge(guarded)
        // Request pipeline: resolution runs before authentication
        // (outermost layer is added last)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticator::authenticate_request,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolver::resolve_tenant,
        ))
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
