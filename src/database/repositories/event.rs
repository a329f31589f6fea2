//! Event repository implementation

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::event::{CreateEventRequest, Event, EventStatus, UpdateEventRequest};
use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction on the underlying pool
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, GatherlyError> {
        Ok(self.pool.begin().await?)
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, event_date, location, total_seats, status, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at
            "#,
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.location)
        .bind(request.total_seats)
        .bind(EventStatus::Scheduled.as_str())
        .bind(request.created_by)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Lock the event row for the duration of the transaction
    ///
    /// Serializes capacity-affecting operations on the event: the lock
    /// holder's count-then-write sequence cannot interleave with another
    /// registration or a seat-total change.
    pub async fn lock_by_id(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i64,
    ) -> Result<Option<Event>, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(event)
    }

    /// Update event fields other than the seat total
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                location = COALESCE($5, location),
                status = COALESCE($6, status),
                updated_at = $7
            WHERE id = $1
            RETURNING id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.location)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Set the seat total within an open transaction
    pub async fn set_total_seats(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i64,
        total_seats: i32,
    ) -> Result<Event, GatherlyError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET total_seats = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(total_seats)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(event)
    }

    /// Delete event within an open transaction
    pub async fn delete(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i64,
    ) -> Result<(), GatherlyError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// List events with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>, GatherlyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at FROM events ORDER BY event_date ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get upcoming events
    pub async fn list_upcoming(&self, limit: i64) -> Result<Vec<Event>, GatherlyError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_date, location, total_seats, status, created_by, created_at, updated_at FROM events WHERE event_date > NOW() AND status = $1 ORDER BY event_date ASC LIMIT $2",
        )
        .bind(EventStatus::Scheduled.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, GatherlyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
