//! Route guard middleware.
//!
//! Applied to the guarded pages. Redirects visitors the guard turns away
//! and hands the admitted identity to handlers via request extensions
//! (see [`RequireIdentity`](super::auth::RequireIdentity)).

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use matjari_core::{Route, authorize};

use super::auth::SessionContext;
use crate::error::set_sentry_user;

/// Apply the route guard to the requested page.
///
/// Paths that do not map to a guarded page pass straight through.
pub async fn require_route_access(
    context: SessionContext,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(route) = Route::from_path(request.uri().path()).filter(|r| r.is_guarded()) else {
        return next.run(request).await;
    };

    let identity = context.identity();
    let decision = authorize(identity, route);
    if let Some(target) = decision.redirect_path() {
        tracing::debug!(
            path = %request.uri().path(),
            decision = ?decision,
            "Route guard redirect"
        );
        return Redirect::to(target).into_response();
    }

    if let Some(identity) = identity {
        set_sentry_user(identity);
        request.extensions_mut().insert(identity.clone());
    }

    next.run(request).await
}
