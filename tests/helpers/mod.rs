//! Test helper modules

pub mod database_helper;
pub mod test_data;

use gatherly::config::Settings;
use gatherly::database::DatabaseService;
use gatherly::services::ServiceFactory;
use sqlx::PgPool;

/// Build the full service stack over a test pool with default settings
pub fn build_services(pool: PgPool) -> ServiceFactory {
    ServiceFactory::new(Settings::default(), DatabaseService::new(pool))
}
