//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers
//! 5. Session layer (tower-sessions with in-memory store)
//! 6. Route guard (guarded pages only)

pub mod auth;
pub mod guard;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{RequireIdentity, SessionContext};
pub use guard::require_route_access;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer, session_keys};
