//! Event service implementation
//!
//! Event CRUD plus the two capacity-coupled guards: shrinking the seat total
//! below the confirmed count and deleting an event with registration history
//! are both rejected. Seat-total changes take the same event row lock as the
//! register transition, so a shrink cannot race a registration.

use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::database::repositories::{EventRepository, RegistrationRepository};
use crate::models::event::{
    CreateEventRequest, Event, EventStatistics, EventStatus, UpdateEventRequest,
};
use crate::models::registration::RegistrationStatus;
use crate::services::auth::AuthContext;
use crate::services::capacity::{occupancy, seats_remaining};
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging;

/// Event service for managing event operations
#[derive(Debug, Clone)]
pub struct EventService {
    events: EventRepository,
    registrations: RegistrationRepository,
    settings: Settings,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(
        events: EventRepository,
        registrations: RegistrationRepository,
        settings: Settings,
    ) -> Self {
        Self {
            events,
            registrations,
            settings,
        }
    }

    /// Create a new event owned by the caller
    pub async fn create(&self, ctx: &AuthContext, mut request: CreateEventRequest) -> Result<Event> {
        if request.title.trim().is_empty() {
            return Err(GatherlyError::InvalidInput(
                "Event title must not be empty".to_string(),
            ));
        }

        if request.total_seats < 1 {
            return Err(GatherlyError::InvalidInput(
                "Event must have at least one seat".to_string(),
            ));
        }

        request.created_by = ctx.user_id;
        let event = self.events.create(request).await?;

        logging::log_event_action(event.id, "create", ctx.user_id, Some(&event.title));
        Ok(event)
    }

    /// Get event by ID
    pub async fn get(&self, event_id: i64) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })
    }

    /// List events with pagination
    pub async fn list(&self, limit: Option<i64>, offset: i64) -> Result<Vec<Event>> {
        let limit = self.resolve_page_size(limit)?;
        debug!(limit = limit, offset = offset, "Listing events");
        self.events.list(limit, offset).await
    }

    /// Get upcoming events
    pub async fn list_upcoming(&self, limit: Option<i64>) -> Result<Vec<Event>> {
        let limit = self.resolve_page_size(limit)?;
        self.events.list_upcoming(limit).await
    }

    /// Update event fields other than the seat total
    pub async fn update(
        &self,
        ctx: &AuthContext,
        event_id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        let event = self.get(event_id).await?;
        ctx.ensure_self_or_admin(event.created_by, "update an event")?;

        if let Some(ref status) = request.status {
            status.parse::<EventStatus>()?;
        }

        let updated = self.events.update(event_id, request).await?;

        logging::log_event_action(event_id, "update", ctx.user_id, None);
        Ok(updated)
    }

    /// Change an event's seat total
    ///
    /// The new total is checked against the confirmed count under the event
    /// row lock; shrinking below the confirmed count fails with
    /// CapacityConflict, shrinking to exactly the confirmed count succeeds.
    pub async fn update_capacity(
        &self,
        ctx: &AuthContext,
        event_id: i64,
        new_total_seats: i32,
    ) -> Result<Event> {
        if new_total_seats < 1 {
            return Err(GatherlyError::InvalidInput(
                "Event must have at least one seat".to_string(),
            ));
        }

        let mut tx = self.events.begin().await?;

        let event = self
            .events
            .lock_by_id(&mut tx, event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        ctx.ensure_self_or_admin(event.created_by, "change an event's capacity")?;

        let confirmed_count = self
            .registrations
            .count_confirmed_in_tx(&mut tx, event_id)
            .await?;

        if i64::from(new_total_seats) < confirmed_count {
            return Err(GatherlyError::CapacityConflict {
                event_id,
                requested_seats: new_total_seats,
                confirmed_count,
            });
        }

        let updated = self
            .events
            .set_total_seats(&mut tx, event_id, new_total_seats)
            .await?;

        tx.commit().await?;

        info!(
            event_id = event_id,
            old_total = event.total_seats,
            new_total = new_total_seats,
            "Event capacity updated"
        );
        Ok(updated)
    }

    /// Delete an event
    ///
    /// Rejected while any registration row references the event, including
    /// cancelled history.
    pub async fn delete(&self, ctx: &AuthContext, event_id: i64) -> Result<()> {
        let mut tx = self.events.begin().await?;

        let event = self
            .events
            .lock_by_id(&mut tx, event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        ctx.ensure_self_or_admin(event.created_by, "delete an event")?;

        let registration_count = self
            .registrations
            .count_for_event_in_tx(&mut tx, event_id)
            .await?;

        if registration_count > 0 {
            return Err(GatherlyError::HasRegistrations { event_id });
        }

        self.events.delete(&mut tx, event_id).await?;
        tx.commit().await?;

        logging::log_event_action(event_id, "delete", ctx.user_id, None);
        Ok(())
    }

    /// Per-status registration counts plus availability for an event
    pub async fn statistics(&self, event_id: i64) -> Result<EventStatistics> {
        let event = self.get(event_id).await?;
        let counts = self.registrations.counts_by_status(event_id).await?;

        let mut confirmed = 0;
        let mut cancelled = 0;
        let mut waitlisted = 0;
        for (status, count) in counts {
            match status.parse::<RegistrationStatus>() {
                Ok(RegistrationStatus::Confirmed) => confirmed = count,
                Ok(RegistrationStatus::Cancelled) => cancelled = count,
                Ok(RegistrationStatus::Waitlisted) => waitlisted = count,
                Err(_) => {
                    debug!(event_id = event_id, status = %status, "Ignoring unknown registration status");
                }
            }
        }

        Ok(EventStatistics {
            event_id,
            total_seats: event.total_seats,
            confirmed,
            cancelled,
            waitlisted,
            available_seats: seats_remaining(event.total_seats, confirmed),
            occupancy_rate: occupancy(event.total_seats, confirmed),
        })
    }

    fn resolve_page_size(&self, requested: Option<i64>) -> Result<i64> {
        let limit = requested.unwrap_or(self.settings.pagination.default_page_size);

        if limit <= 0 {
            return Err(GatherlyError::InvalidInput(
                "Page size must be greater than 0".to_string(),
            ));
        }

        if limit > self.settings.pagination.max_page_size {
            return Err(GatherlyError::InvalidInput(format!(
                "Page size cannot exceed {}",
                self.settings.pagination.max_page_size
            )));
        }

        Ok(limit)
    }
}
