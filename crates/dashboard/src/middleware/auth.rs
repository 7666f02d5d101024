//! Per-request session context and identity extractors.
//!
//! [`SessionContext`] rebuilds the visitor's [`SessionStore`] from their
//! session on every request; handlers mutate it and call
//! [`SessionContext::commit`] to write the storage back. Concurrent requests
//! from one visitor are last-writer-wins.

use std::time::Duration;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use matjari_core::{
    Catalog, Identity, MemoryStorage, Restore, Route, SessionEvent, SessionStore,
};

use super::session::session_keys;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::state::AppState;

/// The visitor's session store, restored from their session.
pub struct SessionContext {
    session: Session,
    store: SessionStore<MemoryStorage>,
}

impl SessionContext {
    /// Restore the session store from `session`.
    ///
    /// A malformed identity snapshot is logged, dropped, and the cleaned
    /// storage committed straight away.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionStorage` if the session cannot be read or written.
    pub async fn load(session: Session, mock_delay: Duration) -> Result<Self, AppError> {
        let storage: MemoryStorage = session
            .get(session_keys::LOCAL_STORAGE)
            .await?
            .unwrap_or_default();

        let (store, outcome) = SessionStore::restore(storage);
        let mut store = store.with_mock_delay(mock_delay);
        store.listen(Box::new(record_transition));

        let context = Self { session, store };
        if let Restore::Discarded(err) = outcome {
            tracing::warn!(error = %err, "Discarded malformed session snapshot");
            context.commit().await?;
        }
        Ok(context)
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.store.identity()
    }

    /// Mutable access to the session store.
    pub const fn store_mut(&mut self) -> &mut SessionStore<MemoryStorage> {
        &mut self.store
    }

    /// Write the store's storage back into the visitor session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionStorage` if the session cannot be written.
    pub async fn commit(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::LOCAL_STORAGE, self.store.storage())
            .await?;
        Ok(())
    }

    /// The visitor's catalog, seeded on first access.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionStorage` if the session cannot be read.
    pub async fn catalog(&self) -> Result<Catalog, AppError> {
        let catalog = self
            .session
            .get::<Catalog>(session_keys::CATALOG)
            .await?
            .unwrap_or_else(Catalog::seeded);
        Ok(catalog)
    }

    /// Persist the visitor's catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionStorage` if the session cannot be written.
    pub async fn save_catalog(&self, catalog: &Catalog) -> Result<(), AppError> {
        self.session.insert(session_keys::CATALOG, catalog).await?;
        Ok(())
    }

    /// Forget the visitor's catalog; the next access reseeds it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SessionStorage` if the session cannot be written.
    pub async fn drop_catalog(&self) -> Result<(), AppError> {
        self.session
            .remove::<Catalog>(session_keys::CATALOG)
            .await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let state = AppState::from_ref(state);
        Self::load(session, state.mock_delay()).await
    }
}

/// Session listener: trace every transition and keep the Sentry user in sync.
fn record_transition(event: &SessionEvent) {
    match event {
        SessionEvent::SignedIn(identity) => {
            tracing::info!(email = %identity.email, "Signed in");
            set_sentry_user(identity);
        }
        SessionEvent::SubscriptionChanged { identity, previous } => {
            tracing::info!(
                email = %identity.email,
                plan = ?identity.subscription,
                previous = ?previous,
                "Subscription changed"
            );
            set_sentry_user(identity);
        }
        SessionEvent::SignedOut(identity) => {
            tracing::info!(email = %identity.email, "Signed out");
            clear_sentry_user();
        }
    }
}

/// Extractor for the identity admitted by the route guard.
///
/// Only meaningful behind `require_route_access`; anywhere else it
/// redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireIdentity(identity): RequireIdentity) -> String {
///     format!("مرحباً، {}", identity.name)
/// }
/// ```
pub struct RequireIdentity(pub Identity);

/// Rejection used when no identity was admitted for the request.
pub struct IdentityRejection;

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        Redirect::to(Route::Login.path()).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireIdentity
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or(IdentityRejection)
    }
}
