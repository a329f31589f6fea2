//! Gatherly event registration backend
//!
//! Backend core for community event registration: events, user accounts, and
//! registrations managed against per-event seat capacity. This library
//! provides the registration lifecycle and the derived seat-capacity ledger;
//! the HTTP routing and authentication layers are external consumers that
//! construct a [`ServiceFactory`] and pass an authenticated
//! [`services::AuthContext`] into each guarded operation.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ErrorKind, GatherlyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
