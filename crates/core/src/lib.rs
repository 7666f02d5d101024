//! Matjari Core - domain library for the storefront dashboard.
//!
//! Identity, session store, route guard and product catalog, used by:
//! - `dashboard` - axum server rendering the pages
//! - `integration-tests` - end-to-end tests against the dashboard router
//!
//! # Architecture
//!
//! No HTTP, no templates, no process-wide state. The session store works
//! over any [`Storage`] handed to it, and the catalog is a plain value the
//! caller keeps wherever it likes.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and subscription tiers
//! - [`identity`] - The signed-in user record and its snapshot layout
//! - [`storage`] - Synchronous key-value storage trait
//! - [`session`] - Session store state machine with listeners
//! - [`guard`] - Route guard decisions
//! - [`catalog`] - In-memory product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod guard;
pub mod identity;
pub mod session;
pub mod storage;
pub mod types;

pub use catalog::{Catalog, Product, ProductFields};
pub use guard::{Decision, Route, authorize};
pub use identity::Identity;
pub use session::{
    ListenerId, Restore, SessionError, SessionEvent, SessionState, SessionStore,
};
pub use storage::{MemoryStorage, Storage};
pub use types::*;
