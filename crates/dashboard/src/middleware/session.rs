//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. Each visitor's session
//! carries their local storage (identity snapshot) and product catalog for
//! as long as the process lives.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::DashboardConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "matjari_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Keys used within a visitor session.
pub mod session_keys {
    /// The visitor's key-value local storage.
    pub const LOCAL_STORAGE: &str = "local_storage";
    /// The visitor's product catalog.
    pub const CATALOG: &str = "catalog";
}

/// Create the session layer with an in-memory store.
///
/// The cookie is `Secure` only when the configured base URL is https.
#[must_use]
pub fn create_session_layer(config: &DashboardConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
