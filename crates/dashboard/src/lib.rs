//! Matjari Dashboard library.
//!
//! Storefront management pages (login, plan selection, overview, product
//! catalog) served by axum. Exposed as a library so the router can be
//! driven in-process by the integration tests.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Askama templates for server-side rendering
//! - tower-sessions (in-memory) for per-visitor state
//! - Domain logic in `matjari-core`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use middleware::{create_session_layer, request_id_middleware, security_headers_middleware};
use state::AppState;

/// Build the application router: pages, static assets, sessions and the
/// per-request middleware.
///
/// Tracing and Sentry layers are added by the binary.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    routes::routes(&state)
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
