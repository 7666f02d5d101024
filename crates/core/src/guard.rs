//! Route guard: decides whether a page may render for the current identity.

use crate::identity::Identity;

/// Pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Subscription,
    Dashboard,
    Products,
}

impl Route {
    /// Canonical path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Subscription => "/subscription",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
        }
    }

    /// Map a request path to its page by the first path segment.
    ///
    /// `/products/abc/edit` belongs to [`Route::Products`]. Returns `None`
    /// for paths outside the dashboard (`/`, `/static/...`, `/health`).
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let segment = path.trim_start_matches('/').split('/').next()?;
        match segment {
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            "subscription" => Some(Self::Subscription),
            "dashboard" => Some(Self::Dashboard),
            "products" => Some(Self::Products),
            _ => None,
        }
    }

    /// Whether navigation to this page goes through [`authorize`].
    #[must_use]
    pub const fn is_guarded(self) -> bool {
        matches!(self, Self::Subscription | Self::Dashboard | Self::Products)
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    RedirectToSubscription,
}

impl Decision {
    /// Where to send the visitor instead, if anywhere.
    #[must_use]
    pub const fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(Route::Login.path()),
            Self::RedirectToSubscription => Some(Route::Subscription.path()),
        }
    }
}

/// Decide whether `target` may render for `identity`.
///
/// Rules, first match wins:
/// 1. nobody signed in: go to login;
/// 2. no subscription tier and `target` is not the plan page: go to the plan page;
/// 3. otherwise allow.
#[must_use]
pub const fn authorize(identity: Option<&Identity>, target: Route) -> Decision {
    match identity {
        None => Decision::RedirectToLogin,
        Some(identity)
            if identity.subscription.is_none() && !matches!(target, Route::Subscription) =>
        {
            Decision::RedirectToSubscription
        }
        Some(_) => Decision::Allow,
    }
}
