//! HTTP route handlers and router assembly.
//!
//! Each route group is mounted under a configurable prefix and carries its own
//! Cache-Control header. The user directory never changes while the process
//! runs, so successful user responses are cacheable; health probes are not.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.
//! Handler panics are converted to a JSON 500 response, and a trailing slash
//! is trimmed before routing so `/health/` and `/api/users/1/` still match.
//! Path matching is case-sensitive.

pub mod health;
pub mod users;

use axum::{middleware, routing::get, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, CACHE_CONTROL_USERS};
use crate::error::panic_response;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// The routed service: a `Router` behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> App {
    let routes = &state.config.routes;

    // Users - cacheable, the directory is fixed for the process lifetime.
    // Error responses set no-store themselves, so this only fills in 200s.
    let user_routes = Router::new()
        .route("/", get(users::list))
        .route("/{id}", get(users::show))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_USERS),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/", get(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    let router = Router::new()
        .nest(&routes.health_prefix, health_routes)
        .nest(&routes.users_prefix, user_routes)
        .with_state(state.clone());

    with_service_layers(router)
}

/// Wraps a stateless router in the layers shared by every route.
pub fn with_service_layers(router: Router) -> App {
    let router = router
        // Panic recovery - any handler fault becomes {"error": "Internal server error"}
        .layer(CatchPanicLayer::custom(panic_response))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer));

    // Must wrap the Router rather than be a Router layer: layers run after
    // the route has already been matched.
    NormalizePath::trim_trailing_slash(router)
}
