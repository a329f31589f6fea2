//! Error handling for Gatherly
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for Gatherly operations
#[derive(Error, Debug)]
pub enum GatherlyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { user_id: i64, event_id: i64 },

    #[error("Registration {registration_id} is already cancelled")]
    AlreadyCancelled { registration_id: i64 },

    #[error("Event {event_id} has no available seats")]
    EventFull { event_id: i64 },

    #[error("Event {event_id} cannot shrink to {requested_seats} seats: {confirmed_count} registrations are confirmed")]
    CapacityConflict {
        event_id: i64,
        requested_seats: i32,
        confirmed_count: i64,
    },

    #[error("Event {event_id} has existing registrations and cannot be deleted")]
    HasRegistrations { event_id: i64 },

    #[error("Event {event_id} is not open for registration (status: {status})")]
    RegistrationClosed { event_id: i64, status: String },

    #[error("Email address is already in use: {email}")]
    EmailTaken { email: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Gatherly operations
pub type Result<T> = std::result::Result<T, GatherlyError>;

/// Failure categories surfaced at the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    InvalidInput,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::Forbidden => write!(f, "forbidden"),
            ErrorKind::InvalidInput => write!(f, "invalid_input"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

impl GatherlyError {
    /// Classify the error for structured failure responses
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatherlyError::UserNotFound { .. }
            | GatherlyError::EventNotFound { .. }
            | GatherlyError::RegistrationNotFound { .. } => ErrorKind::NotFound,
            GatherlyError::AlreadyRegistered { .. }
            | GatherlyError::AlreadyCancelled { .. }
            | GatherlyError::EventFull { .. }
            | GatherlyError::CapacityConflict { .. }
            | GatherlyError::HasRegistrations { .. }
            | GatherlyError::RegistrationClosed { .. }
            | GatherlyError::EmailTaken { .. } => ErrorKind::Conflict,
            GatherlyError::PermissionDenied(_) => ErrorKind::Forbidden,
            GatherlyError::InvalidInput(_) => ErrorKind::InvalidInput,
            GatherlyError::Database(_)
            | GatherlyError::Migration(_)
            | GatherlyError::Config(_)
            | GatherlyError::Serialization(_)
            | GatherlyError::Io(_) => ErrorKind::Internal,
        }
    }

    /// Check if the error is recoverable at the request boundary
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        assert_eq!(
            GatherlyError::EventNotFound { event_id: 1 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GatherlyError::RegistrationNotFound { registration_id: 7 }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_conflict_kinds() {
        assert_eq!(
            GatherlyError::AlreadyRegistered { user_id: 1, event_id: 2 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            GatherlyError::EventFull { event_id: 2 }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            GatherlyError::CapacityConflict {
                event_id: 2,
                requested_seats: 5,
                confirmed_count: 8
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            GatherlyError::HasRegistrations { event_id: 2 }.kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_boundary_classification() {
        assert_eq!(
            GatherlyError::PermissionDenied("nope".to_string()).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            GatherlyError::InvalidInput("bad status".to_string()).kind(),
            ErrorKind::InvalidInput
        );
        assert!(GatherlyError::EventFull { event_id: 1 }.is_recoverable());
        assert!(!GatherlyError::Config("missing url".to_string()).is_recoverable());
    }
}
