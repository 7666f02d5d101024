//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::DashboardConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Visitor data (identity snapshot, catalog)
/// lives in the visitor's session, never here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Latency simulated by login, registration and plan selection.
    #[must_use]
    pub fn mock_delay(&self) -> Duration {
        self.inner.config.mock_delay
    }
}
