//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{GatherlyError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_pagination_config(&settings.pagination)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GatherlyError::Config("Database URL is required".to_string()));
    }

    if !config.url.starts_with("postgresql://") && !config.url.starts_with("postgres://") {
        return Err(GatherlyError::Config(
            "Database URL must be a PostgreSQL connection string".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(GatherlyError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GatherlyError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate pagination configuration
fn validate_pagination_config(config: &super::PaginationConfig) -> Result<()> {
    if config.default_page_size <= 0 {
        return Err(GatherlyError::Config(
            "Default page size must be greater than 0".to_string(),
        ));
    }

    if config.max_page_size < config.default_page_size {
        return Err(GatherlyError::Config(
            "Max page size cannot be smaller than default page size".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    let level = config.level.to_lowercase();

    // EnvFilter directives like "gatherly=debug" are passed through untouched
    if !level.contains('=') && !valid_levels.contains(&level.as_str()) {
        return Err(GatherlyError::Config(format!(
            "Invalid log level: {}",
            config.level
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let mut settings = Settings::default();
        settings.database.url = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        settings.database.max_connections = 10;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_pagination_bounds() {
        let mut settings = Settings::default();
        settings.pagination.default_page_size = 0;
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.pagination.max_page_size = 5;
        settings.pagination.default_page_size = 20;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_log_level_validation() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.logging.level = "gatherly=debug".to_string();
        assert!(validate_settings(&settings).is_ok());
    }
}
