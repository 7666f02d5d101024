//! Authentication route handlers.
//!
//! Login and registration are mocked by the session store: any non-blank
//! input succeeds after the configured delay. Blank checks trim; the identity
//! keeps the values as typed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use matjari_core::Route;

use crate::error::AppError;
use crate::forms::{LoginForm, RegisterForm};
use crate::middleware::SessionContext;

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

/// Re-render a rejected form with its inline message.
fn rejected(template: impl IntoResponse) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, template).into_response()
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        error: None,
        email: String::new(),
    }
}

/// Handle login form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    mut context: SessionContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(err) = form.validate() {
        return Ok(rejected(LoginTemplate {
            error: Some(err.to_string()),
            email: form.email,
        }));
    }

    context
        .store_mut()
        .login(&form.email, &form.password)
        .await?;
    context.commit().await?;

    Ok(Redirect::to(Route::Subscription.path()).into_response())
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        error: None,
        name: String::new(),
        email: String::new(),
    }
}

/// Handle registration form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    mut context: SessionContext,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if let Err(err) = form.validate() {
        return Ok(rejected(RegisterTemplate {
            error: Some(err.to_string()),
            name: form.name,
            email: form.email,
        }));
    }

    context
        .store_mut()
        .register(&form.name, &form.email, &form.password)
        .await?;
    context.commit().await?;

    Ok(Redirect::to(Route::Subscription.path()).into_response())
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out and forget the visitor's catalog.
pub async fn logout(mut context: SessionContext) -> Result<Redirect, AppError> {
    context.store_mut().logout();
    context.commit().await?;
    context.drop_catalog().await?;

    Ok(Redirect::to(Route::Login.path()))
}
