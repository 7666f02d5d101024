//! The authenticated user's profile record.

use serde::{Deserialize, Serialize};

use crate::types::{SubscriptionTier, UserId};

/// Identifier given to every mocked account.
pub const PLACEHOLDER_USER_ID: &str = "1";

/// Display name given to accounts created through login.
pub const PLACEHOLDER_USER_NAME: &str = "مستخدم متجري";

/// The signed-in user.
///
/// This is also the persisted snapshot layout: serialized as
/// `{"id","email","name","subscription"}` with `subscription` either `null`
/// or a lowercase tier name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub subscription: Option<SubscriptionTier>,
}

impl Identity {
    /// Identity produced by a (mocked) login.
    #[must_use]
    pub fn placeholder(email: impl Into<String>) -> Self {
        Self::registered(PLACEHOLDER_USER_NAME, email)
    }

    /// Identity produced by a (mocked) registration.
    #[must_use]
    pub fn registered(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(PLACEHOLDER_USER_ID),
            email: email.into(),
            name: name.into(),
            subscription: None,
        }
    }

    /// Whether a paid tier is active.
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}
