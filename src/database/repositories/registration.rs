//! Registration repository implementation
//!
//! One row per (event, user) pair. Seat-affecting writes run inside a
//! transaction that holds the event row lock, so the confirmed count a caller
//! observed is still valid when its write commits.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::registration::{Registration, RegistrationStatus};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction on the underlying pool
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, GatherlyError> {
        Ok(self.pool.begin().await?)
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Registration>, GatherlyError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, user_id, status, registration_date, created_at, updated_at FROM registrations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find the lineage row for a (user, event) pair
    pub async fn find_by_user_and_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Registration>, GatherlyError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, user_id, status, registration_date, created_at, updated_at FROM registrations WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find the lineage row within an open transaction
    pub async fn find_by_user_and_event_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Registration>, GatherlyError> {
        let registration = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, user_id, status, registration_date, created_at, updated_at FROM registrations WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(registration)
    }

    /// List a user's registrations, most recent first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Registration>, GatherlyError> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, user_id, status, registration_date, created_at, updated_at FROM registrations WHERE user_id = $1 ORDER BY registration_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// List an event's registrations, most recent first
    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>, GatherlyError> {
        let registrations = sqlx::query_as::<_, Registration>(
            "SELECT id, event_id, user_id, status, registration_date, created_at, updated_at FROM registrations WHERE event_id = $1 ORDER BY registration_date DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Count confirmed registrations for an event
    pub async fn count_confirmed(&self, event_id: i64) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count confirmed registrations within an open transaction
    pub async fn count_confirmed_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        event_id: i64,
    ) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }

    /// Count registrations of any status within an open transaction
    pub async fn count_for_event_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        event_id: i64,
    ) -> Result<i64, GatherlyError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&mut **tx)
                .await?;

        Ok(count.0)
    }

    /// Create a confirmed registration within an open transaction
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        event_id: i64,
        user_id: i64,
    ) -> Result<Registration, GatherlyError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, user_id, status, registration_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_id, user_id, status, registration_date, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .bind(Utc::now())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(registration)
    }

    /// Re-activate a cancelled lineage within an open transaction
    ///
    /// Keeps the row identity; the registration date is reset to now.
    pub async fn reactivate_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i64,
    ) -> Result<Registration, GatherlyError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = $2, registration_date = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, event_id, user_id, status, registration_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(registration)
    }

    /// Set registration status
    pub async fn set_status(
        &self,
        id: i64,
        status: RegistrationStatus,
    ) -> Result<Registration, GatherlyError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, event_id, user_id, status, registration_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Per-status registration counts for an event
    pub async fn counts_by_status(
        &self,
        event_id: i64,
    ) -> Result<Vec<(String, i64)>, GatherlyError> {
        let counts: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM registrations WHERE event_id = $1 GROUP BY status",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
