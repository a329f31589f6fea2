//! User service implementation
//!
//! Account management for registrants and organizers. Role changes are not
//! exposed here; roles arrive from the authentication layer as data.

use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::{GatherlyError, Result};

/// User service for managing user accounts
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
    settings: Settings,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(users: UserRepository, settings: Settings) -> Self {
        Self { users, settings }
    }

    /// Create a new user account
    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        validate_email(&request.email)?;

        if request.full_name.trim().is_empty() {
            return Err(GatherlyError::InvalidInput(
                "Full name must not be empty".to_string(),
            ));
        }

        if let Some(existing) = self.users.find_by_email(&request.email).await? {
            debug!(user_id = existing.id, "Email already registered");
            return Err(GatherlyError::EmailTaken {
                email: request.email,
            });
        }

        let user = self.users.create(request).await?;
        info!(user_id = user.id, "New user account created");

        Ok(user)
    }

    /// Get user by ID
    pub async fn get(&self, user_id: i64) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(GatherlyError::UserNotFound { user_id })
    }

    /// Get user by email address
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users.find_by_email(email).await
    }

    /// Update a user account
    pub async fn update(&self, user_id: i64, request: UpdateUserRequest) -> Result<User> {
        if let Some(ref email) = request.email {
            validate_email(email)?;

            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(GatherlyError::EmailTaken {
                        email: email.clone(),
                    });
                }
            }
        }

        // Surface a NotFound before the update touches zero rows
        self.get(user_id).await?;

        let user = self.users.update(user_id, request).await?;
        info!(user_id = user_id, "User account updated");

        Ok(user)
    }

    /// List users with pagination
    pub async fn list(&self, limit: Option<i64>, offset: i64) -> Result<Vec<User>> {
        let limit = limit.unwrap_or(self.settings.pagination.default_page_size);

        if limit <= 0 || limit > self.settings.pagination.max_page_size {
            return Err(GatherlyError::InvalidInput(format!(
                "Page size must be between 1 and {}",
                self.settings.pagination.max_page_size
            )));
        }

        self.users.list(limit, offset).await
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64> {
        self.users.count().await
    }
}

/// Minimal shape check; full address validation is the input layer's job
fn validate_email(email: &str) -> Result<()> {
    let valid = email.contains('@') && !email.starts_with('@') && !email.ends_with('@');

    if !valid {
        return Err(GatherlyError::InvalidInput(format!(
            "Invalid email address: {email}"
        )));
    }

    Ok(())
}
