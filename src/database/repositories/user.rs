//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, GatherlyError> {
        let role = request
            .role
            .unwrap_or_else(|| UserRole::User.as_str().to_string());

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, full_name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, full_name, role, is_active, created_at, updated_at
            "#,
        )
        .bind(request.email)
        .bind(request.full_name)
        .bind(role)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, GatherlyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, role, is_active, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email address
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, GatherlyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, role, is_active, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, GatherlyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                is_active = COALESCE($4, is_active),
                updated_at = $5
            WHERE id = $1
            RETURNING id, email, full_name, role, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.email)
        .bind(request.full_name)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, GatherlyError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, role, is_active, created_at, updated_at FROM users ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
