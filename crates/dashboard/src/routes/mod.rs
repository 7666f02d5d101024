//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Redirect to /login
//! GET  /health                  - Health check
//!
//! # Auth (open)
//! GET  /login                   - Login page
//! POST /login                   - Log in
//! GET  /register                - Registration page
//! POST /register                - Register
//! POST /logout                  - Log out
//!
//! # Guarded
//! GET  /subscription            - Plan selection
//! POST /subscription            - Select plan
//! GET  /dashboard               - Overview
//! GET  /products                - Product listing (?q= filter)
//! POST /products                - Create product
//! GET  /products/new            - Create form
//! POST /products/{id}           - Update product
//! GET  /products/{id}/edit      - Edit form
//! GET  /products/{id}/delete    - Delete confirmation
//! POST /products/{id}/delete    - Delete product
//! ```

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod subscription;

use axum::{
    Router,
    middleware::from_fn_with_state,
    response::Redirect,
    routing::{get, post},
};

use matjari_core::Route;

use crate::middleware::require_route_access;
use crate::state::AppState;

/// Build the router with all page routes.
#[must_use]
pub fn routes(state: &AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route(
            "/subscription",
            get(subscription::index).post(subscription::select),
        )
        .route("/dashboard", get(dashboard::index))
        .route("/products", get(products::index).post(products::create))
        .route("/products/new", get(products::new_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit_form))
        .route(
            "/products/{id}/delete",
            get(products::confirm_delete).post(products::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_route_access));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .merge(guarded)
}

async fn root() -> Redirect {
    Redirect::to(Route::Login.path())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
