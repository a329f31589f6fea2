//! Database service layer
//!
//! This module bundles the repositories over a shared connection pool

use crate::database::{
    connection, DatabasePool, EventRepository, RegistrationRepository, UserRepository,
};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), GatherlyError> {
        connection::health_check(&self.pool).await
    }
}
