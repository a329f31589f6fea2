//! Capacity ledger service
//!
//! Seat availability is derived from the live confirmed-registration count,
//! never stored: `available = total_seats - confirmed`. Cancelling a
//! registration frees its seat implicitly on the next read, and there is no
//! cached counter that could drift from the registration rows.

use tracing::debug;

use crate::database::repositories::{EventRepository, RegistrationRepository};
use crate::models::event::EventAvailability;
use crate::utils::errors::{GatherlyError, Result};

/// Result of a seat availability check
#[derive(Debug, Clone)]
pub struct SeatAvailability {
    pub ok: bool,
    pub available_seats: i64,
    pub message: Option<String>,
}

/// Seats left once confirmed registrations are accounted for
pub(crate) fn seats_remaining(total_seats: i32, confirmed_count: i64) -> i64 {
    i64::from(total_seats) - confirmed_count
}

/// Confirmed seats as a percentage of the total (total_seats >= 1)
pub(crate) fn occupancy(total_seats: i32, confirmed_count: i64) -> f64 {
    confirmed_count as f64 / f64::from(total_seats) * 100.0
}

/// Capacity ledger for event seat accounting
#[derive(Debug, Clone)]
pub struct CapacityService {
    events: EventRepository,
    registrations: RegistrationRepository,
}

impl CapacityService {
    /// Create a new CapacityService instance
    pub fn new(events: EventRepository, registrations: RegistrationRepository) -> Self {
        Self {
            events,
            registrations,
        }
    }

    /// Available seats for an event
    pub async fn available_seats(&self, event_id: i64) -> Result<i64> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        let confirmed = self.registrations.count_confirmed(event_id).await?;
        let available = seats_remaining(event.total_seats, confirmed);

        debug!(
            event_id = event_id,
            total_seats = event.total_seats,
            confirmed = confirmed,
            available = available,
            "Computed available seats"
        );

        Ok(available)
    }

    /// Check whether the event can seat `requested` more registrations
    pub async fn check_availability(
        &self,
        event_id: i64,
        requested: i64,
    ) -> Result<SeatAvailability> {
        let available_seats = self.available_seats(event_id).await?;
        let ok = available_seats >= requested;

        let message = if ok {
            None
        } else {
            Some(format!(
                "Requested {requested} seats but only {available_seats} are available"
            ))
        };

        Ok(SeatAvailability {
            ok,
            available_seats,
            message,
        })
    }

    /// Confirmed seats as a percentage of the event's total
    pub async fn occupancy_rate(&self, event_id: i64) -> Result<f64> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        let confirmed = self.registrations.count_confirmed(event_id).await?;
        Ok(occupancy(event.total_seats, confirmed))
    }

    /// Availability snapshot backing the event availability endpoint
    pub async fn event_availability(&self, event_id: i64) -> Result<EventAvailability> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        let confirmed = self.registrations.count_confirmed(event_id).await?;

        Ok(EventAvailability {
            total_seats: event.total_seats,
            available_seats: seats_remaining(event.total_seats, confirmed),
            occupancy_rate: occupancy(event.total_seats, confirmed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seats_remaining() {
        assert_eq!(seats_remaining(10, 0), 10);
        assert_eq!(seats_remaining(10, 4), 6);
        assert_eq!(seats_remaining(10, 10), 0);
        // An admin override can push the confirmed count past the total
        assert_eq!(seats_remaining(2, 3), -1);
    }

    #[test]
    fn test_occupancy() {
        assert_eq!(occupancy(10, 0), 0.0);
        assert_eq!(occupancy(10, 5), 50.0);
        assert_eq!(occupancy(10, 10), 100.0);
        assert_eq!(occupancy(1, 0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_remaining_plus_confirmed_is_total(total in 1i32..=10_000, confirmed in 0i64..=10_000) {
            let remaining = seats_remaining(total, confirmed);
            prop_assert_eq!(remaining + confirmed, i64::from(total));
        }

        #[test]
        fn prop_occupancy_is_finite_and_scaled(total in 1i32..=10_000, confirmed in 0i64..=10_000) {
            let rate = occupancy(total, confirmed);
            prop_assert!(rate.is_finite());
            prop_assert!(rate >= 0.0);
            if confirmed <= i64::from(total) {
                prop_assert!(rate <= 100.0);
            }
        }
    }
}
