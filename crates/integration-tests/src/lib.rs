//! Integration tests for the Matjari dashboard.
//!
//! Each test spawns its own dashboard on an ephemeral local port, with the
//! mock delay disabled, and talks to it through a cookie-keeping client that
//! does not follow redirects.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p matjari-integration-tests
//! ```

use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header::LOCATION, redirect::Policy};
use tokio::net::TcpListener;

use matjari_core::Route;
use matjari_dashboard::{app, config::DashboardConfig, state::AppState};

/// A running dashboard plus a client acting as one visitor.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
}

impl TestApp {
    /// Start a dashboard with default configuration and no mock delay.
    pub async fn spawn() -> Self {
        let config = DashboardConfig {
            mock_delay: Duration::ZERO,
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../dashboard/static")),
            ..DashboardConfig::default()
        };
        Self::spawn_with(config).await
    }

    /// Start a dashboard with the given configuration.
    pub async fn spawn_with(config: DashboardConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let router = app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: visitor(),
        }
    }

    /// A second, independent visitor against the same server.
    #[must_use]
    pub fn other_visitor(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: visitor(),
        }
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST a url-encoded form to `path`.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Log in as `email`; asserts the redirect to plan selection.
    pub async fn login(&self, email: &str) {
        let resp = self
            .post_form(Route::Login.path(), &[("email", email), ("password", "secret")])
            .await;
        assert_redirect(&resp, Route::Subscription.path());
    }

    /// Log in and pick `plan`; asserts the redirect to the dashboard.
    pub async fn login_subscribed(&self, email: &str, plan: &str) {
        self.login(email).await;
        let resp = self
            .post_form(Route::Subscription.path(), &[("plan", plan)])
            .await;
        assert_redirect(&resp, Route::Dashboard.path());
    }

    /// GET `path` and return the body of a 200 response.
    pub async fn page(&self, path: &str) -> String {
        let resp = self.get(path).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
        resp.text().await.expect("Failed to read response body")
    }
}

fn visitor() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// The `Location` header of a response, if any.
#[must_use]
pub fn location(resp: &Response) -> Option<&str> {
    resp.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

/// Assert `resp` is a 303 redirect to `target`.
///
/// # Panics
///
/// Panics if the response is not a See Other redirect to `target`.
pub fn assert_redirect(resp: &Response, target: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "expected redirect to {target}");
    assert_eq!(location(resp), Some(target));
}
