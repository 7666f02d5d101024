//! Session store: the current identity, its persisted snapshot, and
//! transition notifications.
//!
//! # State machine
//!
//! ```text
//!             restore()
//!                 │
//!      ┌──────────┴───────────┐
//!      ▼                      ▼
//!  Anonymous ──login/register──▶ Unsubscribed ──update_subscription──▶ Subscribed
//!      ▲                              │                                   │
//!      └────────────logout────────────┴──────────────logout───────────────┘
//! ```
//!
//! The store is an explicit value: build it from a [`Storage`] with
//! [`SessionStore::restore`], hand it to whoever needs it, and read the
//! storage back out with [`SessionStore::into_storage`] when done.

use std::fmt;
use std::time::Duration;

use crate::identity::Identity;
use crate::storage::Storage;
use crate::types::SubscriptionTier;

/// Storage key holding the serialized [`Identity`].
pub const SNAPSHOT_KEY: &str = "currentUser";

/// Latency simulated by login, register and plan selection.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1000);

/// Errors raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The identity could not be serialized into the snapshot.
    #[error("failed to write session snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// What [`SessionStore::restore`] found in storage.
#[derive(Debug)]
pub enum Restore {
    /// No snapshot was stored.
    Anonymous,
    /// A valid snapshot was loaded.
    Restored,
    /// A snapshot existed but could not be parsed. It has been removed and
    /// the session starts anonymous.
    Discarded(serde_json::Error),
}

/// Coarse session state, as consulted by the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Anonymous,
    /// Signed in without a subscription tier.
    Unsubscribed,
    Subscribed,
}

/// A state transition, delivered to listeners after it has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Login or registration completed.
    SignedIn(Identity),
    /// The tier of the active identity was set.
    SubscriptionChanged {
        identity: Identity,
        previous: Option<SubscriptionTier>,
    },
    /// The carried identity was signed out.
    SignedOut(Identity),
}

/// Callback invoked on every [`SessionEvent`].
pub type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Handle returned by [`SessionStore::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Holder of the current identity.
pub struct SessionStore<S> {
    storage: S,
    identity: Option<Identity>,
    mock_delay: Duration,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<S: Storage> SessionStore<S> {
    /// Restore the session from `storage`.
    ///
    /// Never fails: a malformed snapshot is removed and reported through
    /// [`Restore::Discarded`], leaving the session anonymous.
    pub fn restore(mut storage: S) -> (Self, Restore) {
        let (identity, outcome) = match storage.get(SNAPSHOT_KEY) {
            None => (None, Restore::Anonymous),
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => (Some(identity), Restore::Restored),
                Err(err) => {
                    storage.remove(SNAPSHOT_KEY);
                    (None, Restore::Discarded(err))
                }
            },
        };

        let store = Self {
            storage,
            identity,
            mock_delay: DEFAULT_MOCK_DELAY,
            listeners: Vec::new(),
            next_listener_id: 0,
        };
        (store, outcome)
    }

    /// Set the simulated latency of login, register and plan selection.
    #[must_use]
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    /// The simulated latency.
    #[must_use]
    pub const fn mock_delay(&self) -> Duration {
        self.mock_delay
    }

    /// The active identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Current position in the state machine.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.identity {
            None => SessionState::Anonymous,
            Some(identity) if identity.is_subscribed() => SessionState::Subscribed,
            Some(_) => SessionState::Unsubscribed,
        }
    }

    /// Borrow the backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Tear the store down and return its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Register a listener for session transitions.
    pub fn listen(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Sign in after the mock delay.
    ///
    /// No credential check is made: any email and password produce a
    /// placeholder identity bound to `email`, without a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Snapshot`] if the identity cannot be persisted.
    pub async fn login(&mut self, email: &str, _password: &str) -> Result<&Identity, SessionError> {
        self.simulate_latency().await;
        self.sign_in(Identity::placeholder(email))
    }

    /// Create an account after the mock delay and sign it in.
    ///
    /// Inputs are not validated here; callers check presence first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Snapshot`] if the identity cannot be persisted.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<&Identity, SessionError> {
        self.simulate_latency().await;
        self.sign_in(Identity::registered(name, email))
    }

    /// Clear the identity and its persisted snapshot.
    pub fn logout(&mut self) {
        self.storage.remove(SNAPSHOT_KEY);
        if let Some(previous) = self.identity.take() {
            self.notify(&SessionEvent::SignedOut(previous));
        }
    }

    /// Set the tier of the active identity and re-persist it.
    ///
    /// Returns `Ok(false)` without touching anything when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Snapshot`] if the identity cannot be persisted;
    /// the in-memory identity is left unchanged in that case.
    pub fn update_subscription(&mut self, tier: SubscriptionTier) -> Result<bool, SessionError> {
        let Some(current) = &self.identity else {
            return Ok(false);
        };

        let mut updated = current.clone();
        let previous = updated.subscription.replace(tier);
        write_snapshot(&mut self.storage, &updated)?;
        self.identity = Some(updated.clone());
        self.notify(&SessionEvent::SubscriptionChanged {
            identity: updated,
            previous,
        });
        Ok(true)
    }

    /// Choose a plan after the mock delay.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::update_subscription`].
    pub async fn select_plan(&mut self, tier: SubscriptionTier) -> Result<bool, SessionError> {
        self.simulate_latency().await;
        self.update_subscription(tier)
    }

    fn sign_in(&mut self, identity: Identity) -> Result<&Identity, SessionError> {
        write_snapshot(&mut self.storage, &identity)?;
        self.notify(&SessionEvent::SignedIn(identity.clone()));
        Ok(self.identity.insert(identity))
    }

    async fn simulate_latency(&self) {
        if !self.mock_delay.is_zero() {
            tokio::time::sleep(self.mock_delay).await;
        }
    }

    fn notify(&self, event: &SessionEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage", &self.storage)
            .field("identity", &self.identity)
            .field("mock_delay", &self.mock_delay)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn write_snapshot<S: Storage>(storage: &mut S, identity: &Identity) -> Result<(), SessionError> {
    let snapshot = serde_json::to_string(identity)?;
    storage.set(SNAPSHOT_KEY, snapshot);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::storage::MemoryStorage;

    fn anonymous() -> SessionStore<MemoryStorage> {
        let (store, outcome) = SessionStore::restore(MemoryStorage::new());
        assert!(matches!(outcome, Restore::Anonymous));
        store.with_mock_delay(Duration::ZERO)
    }

    fn recorder(store: &mut SessionStore<MemoryStorage>) -> Arc<Mutex<Vec<SessionEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.listen(Box::new(move |event| sink.lock().unwrap().push(event.clone())));
        events
    }

    #[tokio::test]
    async fn test_login_then_logout_returns_to_anonymous() {
        let mut store = anonymous();

        let identity = store.login("owner@shop.sa", "secret").await.unwrap();
        assert_eq!(identity.email, "owner@shop.sa");
        assert_eq!(store.state(), SessionState::Unsubscribed);
        assert!(store.storage().get(SNAPSHOT_KEY).is_some());

        store.logout();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.identity().is_none());
        assert!(store.storage().get(SNAPSHOT_KEY).is_none());
    }

    #[tokio::test]
    async fn test_register_uses_supplied_name() {
        let mut store = anonymous();
        let identity = store.register("سارة", "sara@shop.sa", "pw").await.unwrap();
        assert_eq!(identity.name, "سارة");
        assert_eq!(identity.subscription, None);
    }

    #[tokio::test]
    async fn test_update_subscription_sets_tier_and_persists() {
        let mut store = anonymous();
        store.login("owner@shop.sa", "pw").await.unwrap();

        for tier in SubscriptionTier::ALL {
            assert!(store.update_subscription(tier).unwrap());
            assert_eq!(store.identity().unwrap().subscription, Some(tier));

            let raw = store.storage().get(SNAPSHOT_KEY).unwrap();
            let persisted: Identity = serde_json::from_str(&raw).unwrap();
            assert_eq!(persisted.subscription, Some(tier));
        }
        assert_eq!(store.state(), SessionState::Subscribed);
    }

    #[test]
    fn test_update_subscription_without_identity_is_noop() {
        let mut store = anonymous();
        let events = recorder(&mut store);

        assert!(!store.update_subscription(SubscriptionTier::Weekly).unwrap());
        assert!(store.identity().is_none());
        assert!(store.storage().is_empty());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_restore_valid_snapshot() {
        let mut storage = MemoryStorage::new();
        storage.set(
            SNAPSHOT_KEY,
            r#"{"id":"1","email":"a@b.c","name":"n","subscription":"monthly"}"#.to_string(),
        );

        let (store, outcome) = SessionStore::restore(storage);
        assert!(matches!(outcome, Restore::Restored));
        assert_eq!(store.state(), SessionState::Subscribed);
        assert_eq!(store.identity().unwrap().email, "a@b.c");
    }

    #[test]
    fn test_restore_malformed_snapshot_is_discarded() {
        for raw in ["{not json", "null", r#"{"id":"1"}"#, r#"{"id":"1","email":"a","name":"n","subscription":"daily"}"#] {
            let mut storage = MemoryStorage::new();
            storage.set(SNAPSHOT_KEY, raw.to_string());

            let (store, outcome) = SessionStore::restore(storage);
            assert!(matches!(outcome, Restore::Discarded(_)), "{raw}");
            assert_eq!(store.state(), SessionState::Anonymous);
            assert!(store.storage().get(SNAPSHOT_KEY).is_none());
        }
    }

    #[tokio::test]
    async fn test_listeners_observe_transitions() {
        let mut store = anonymous();
        let events = recorder(&mut store);

        store.login("a@b.c", "pw").await.unwrap();
        store.update_subscription(SubscriptionTier::Yearly).unwrap();
        store.logout();
        store.logout();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], SessionEvent::SignedIn(identity) if identity.email == "a@b.c"));
        assert!(matches!(
            &events[1],
            SessionEvent::SubscriptionChanged { previous: None, identity }
                if identity.subscription == Some(SubscriptionTier::Yearly)
        ));
        assert!(matches!(&events[2], SessionEvent::SignedOut(_)));
    }

    #[tokio::test]
    async fn test_unlisten_stops_delivery() {
        let mut store = anonymous();
        let events = Arc::new(Mutex::new(0_u32));
        let sink = Arc::clone(&events);
        let id = store.listen(Box::new(move |_| *sink.lock().unwrap() += 1));

        assert!(store.unlisten(id));
        assert!(!store.unlisten(id));
        store.login("a@b.c", "pw").await.unwrap();
        assert_eq!(*events.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_mock_delay() {
        let (store, _) = SessionStore::restore(MemoryStorage::new());
        let mut store = store.with_mock_delay(Duration::from_millis(1000));

        let started = tokio::time::Instant::now();
        store.login("a@b.c", "pw").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_plan_waits_then_updates() {
        let (store, _) = SessionStore::restore(MemoryStorage::new());
        let mut store = store.with_mock_delay(Duration::from_millis(500));
        store.login("a@b.c", "pw").await.unwrap();

        let started = tokio::time::Instant::now();
        assert!(store.select_plan(SubscriptionTier::Weekly).await.unwrap());
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(
            store.identity().unwrap().subscription,
            Some(SubscriptionTier::Weekly)
        );
    }

    #[tokio::test]
    async fn test_login_twice_last_wins() {
        let mut store = anonymous();
        store.login("first@shop.sa", "pw").await.unwrap();
        store.login("second@shop.sa", "pw").await.unwrap();

        let raw = store.storage().get(SNAPSHOT_KEY).unwrap();
        let persisted: Identity = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.email, "second@shop.sa");
    }
}
