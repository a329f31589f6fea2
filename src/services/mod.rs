//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod capacity;
pub mod event;
pub mod registration;
pub mod user;

// Re-export commonly used services
pub use auth::AuthContext;
pub use capacity::{CapacityService, SeatAvailability};
pub use event::EventService;
pub use registration::RegistrationService;
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub event_service: EventService,
    pub registration_service: RegistrationService,
    pub capacity_service: CapacityService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, database: DatabaseService) -> Self {
        let user_service = UserService::new(database.users.clone(), settings.clone());
        let event_service = EventService::new(
            database.events.clone(),
            database.registrations.clone(),
            settings.clone(),
        );
        let registration_service =
            RegistrationService::new(database.registrations.clone(), database.events.clone());
        let capacity_service =
            CapacityService::new(database.events.clone(), database.registrations.clone());

        Self {
            user_service,
            event_service,
            registration_service,
            capacity_service,
            database,
        }
    }

    /// Health check for the backing services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.database.health_check().await.is_ok();

        ServiceHealthStatus { database_healthy }
    }
}

/// Health status for the backing services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }
}
