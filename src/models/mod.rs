//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod registration;
pub mod user;

// Re-export commonly used models
pub use event::{
    CreateEventRequest, Event, EventAvailability, EventStatistics, EventStatus, UpdateEventRequest,
};
pub use registration::{Registration, RegistrationStatus, RegistrationStatusCheck};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserRole};
