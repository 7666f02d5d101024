//! Value types for the dashboard domain.
//!
//! Type-safe wrappers for identifiers, prices and subscription tiers.

pub mod id;
pub mod price;
pub mod subscription;

pub use id::{GENERATED_ID_LEN, ProductId, UserId};
pub use price::{CURRENCY_LABEL, Price, PriceError};
pub use subscription::{Plan, SubscriptionTier, UnknownTier};
