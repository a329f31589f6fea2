//! Registration lifecycle service
//!
//! State machine for a user's registration lineage on an event: first
//! registration creates the row, cancellation and re-registration mutate it in
//! place, and an admin override can force any status. Every seat-taking
//! transition runs inside a per-event critical section: the event row is
//! locked, the confirmed count is taken under the lock, and the write commits
//! in the same transaction, so two contenders for the last seat are
//! serialized and the loser observes the committed count.

use tracing::{debug, info};

use crate::database::repositories::{EventRepository, RegistrationRepository};
use crate::models::registration::{Registration, RegistrationStatus, RegistrationStatusCheck};
use crate::services::auth::AuthContext;
use crate::services::capacity::seats_remaining;
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging;

/// How a register request is applied to the lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterAction {
    /// No lineage exists; create a confirmed row
    Create,
    /// A cancelled lineage exists; re-activate the row with this id
    Reactivate(i64),
}

/// Decide the register transition from the lineage state and the seat count
///
/// Implements the transition table: no record or a cancelled record may take a
/// seat when one is available; a confirmed or waitlisted record is already an
/// active lineage and conflicts.
fn evaluate_register(
    event_id: i64,
    user_id: i64,
    existing: Option<&Registration>,
    available_seats: i64,
) -> Result<RegisterAction> {
    match existing {
        Some(registration) if registration.is_cancelled() => {
            if available_seats < 1 {
                return Err(GatherlyError::EventFull { event_id });
            }
            Ok(RegisterAction::Reactivate(registration.id))
        }
        Some(_) => Err(GatherlyError::AlreadyRegistered { user_id, event_id }),
        None => {
            if available_seats < 1 {
                return Err(GatherlyError::EventFull { event_id });
            }
            Ok(RegisterAction::Create)
        }
    }
}

/// Registration lifecycle service
#[derive(Debug, Clone)]
pub struct RegistrationService {
    registrations: RegistrationRepository,
    events: EventRepository,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(registrations: RegistrationRepository, events: EventRepository) -> Self {
        Self {
            registrations,
            events,
        }
    }

    /// Register a user for an event
    ///
    /// Creates the lineage row on first registration, re-activates it after a
    /// cancellation. Fails with AlreadyRegistered while the lineage is active,
    /// EventFull when no seat is left, and RegistrationClosed for events that
    /// no longer accept registrations.
    pub async fn register(&self, user_id: i64, event_id: i64) -> Result<Registration> {
        debug!(user_id = user_id, event_id = event_id, "Registering user for event");

        let mut tx = self.registrations.begin().await?;

        let event = self
            .events
            .lock_by_id(&mut tx, event_id)
            .await?
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        if !event.is_open_for_registration() {
            return Err(GatherlyError::RegistrationClosed {
                event_id,
                status: event.status.clone(),
            });
        }

        let confirmed = self
            .registrations
            .count_confirmed_in_tx(&mut tx, event_id)
            .await?;
        let available = seats_remaining(event.total_seats, confirmed);

        let existing = self
            .registrations
            .find_by_user_and_event_in_tx(&mut tx, user_id, event_id)
            .await?;

        let registration = match evaluate_register(event_id, user_id, existing.as_ref(), available)?
        {
            RegisterAction::Create => {
                self.registrations
                    .create_in_tx(&mut tx, event_id, user_id)
                    .await?
            }
            RegisterAction::Reactivate(registration_id) => {
                self.registrations
                    .reactivate_in_tx(&mut tx, registration_id)
                    .await?
            }
        };

        tx.commit().await?;

        logging::log_registration_action(registration.id, event_id, user_id, "register");
        Ok(registration)
    }

    /// Cancel a registration
    ///
    /// The caller must own the registration or hold the admin role. The freed
    /// seat needs no bookkeeping: availability is recomputed from the
    /// confirmed count on the next read.
    pub async fn cancel(&self, ctx: &AuthContext, registration_id: i64) -> Result<Registration> {
        debug!(
            registration_id = registration_id,
            caller_id = ctx.user_id,
            "Cancelling registration"
        );

        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(GatherlyError::RegistrationNotFound { registration_id })?;

        ctx.ensure_self_or_admin(registration.user_id, "cancel a registration")?;

        if registration.is_cancelled() {
            return Err(GatherlyError::AlreadyCancelled { registration_id });
        }

        let cancelled = self
            .registrations
            .set_status(registration_id, RegistrationStatus::Cancelled)
            .await?;

        logging::log_registration_action(
            cancelled.id,
            cancelled.event_id,
            cancelled.user_id,
            "cancel",
        );
        Ok(cancelled)
    }

    /// Check a user's registration status for an event
    ///
    /// Only a confirmed lineage counts as registered; a missing lineage yields
    /// the not-registered answer rather than an error.
    pub async fn check_status(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<RegistrationStatusCheck> {
        let registration = self
            .registrations
            .find_by_user_and_event(user_id, event_id)
            .await?;

        Ok(match registration {
            Some(registration) => RegistrationStatusCheck::from_registration(&registration),
            None => RegistrationStatusCheck::not_registered(),
        })
    }

    /// List a user's registrations, most recent first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Registration>> {
        debug!(user_id = user_id, "Listing registrations for user");
        self.registrations.list_by_user(user_id).await
    }

    /// List an event's registrations, most recent first (admin only)
    pub async fn list_for_event(
        &self,
        ctx: &AuthContext,
        event_id: i64,
    ) -> Result<Vec<Registration>> {
        ctx.ensure_admin("list event registrations")?;

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(GatherlyError::EventNotFound { event_id });
        }

        self.registrations.list_by_event(event_id).await
    }

    /// Administrative status override
    ///
    /// Sets any of the three statuses directly, without a capacity check;
    /// waitlisted is reachable only through this path.
    pub async fn set_status(
        &self,
        ctx: &AuthContext,
        registration_id: i64,
        new_status: &str,
    ) -> Result<Registration> {
        ctx.ensure_admin("override a registration status")?;

        let status: RegistrationStatus = new_status.parse()?;

        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(GatherlyError::RegistrationNotFound { registration_id })?;

        let updated = self.registrations.set_status(registration.id, status).await?;

        logging::log_admin_action(
            ctx.user_id,
            "set_registration_status",
            Some(&registration_id.to_string()),
            Some(status.as_str()),
        );
        info!(
            registration_id = registration_id,
            status = status.as_str(),
            "Registration status overridden"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn lineage(status: RegistrationStatus) -> Registration {
        Registration {
            id: 11,
            event_id: 1,
            user_id: 2,
            status: status.as_str().to_string(),
            registration_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_registration_takes_a_seat() {
        assert_matches!(
            evaluate_register(1, 2, None, 1),
            Ok(RegisterAction::Create)
        );
        assert_matches!(
            evaluate_register(1, 2, None, 5),
            Ok(RegisterAction::Create)
        );
    }

    #[test]
    fn test_first_registration_rejected_when_full() {
        assert_matches!(
            evaluate_register(1, 2, None, 0),
            Err(GatherlyError::EventFull { event_id: 1 })
        );
    }

    #[test]
    fn test_cancelled_lineage_is_reactivated() {
        let cancelled = lineage(RegistrationStatus::Cancelled);
        assert_matches!(
            evaluate_register(1, 2, Some(&cancelled), 1),
            Ok(RegisterAction::Reactivate(11))
        );
    }

    #[test]
    fn test_reactivation_rejected_when_full() {
        let cancelled = lineage(RegistrationStatus::Cancelled);
        assert_matches!(
            evaluate_register(1, 2, Some(&cancelled), 0),
            Err(GatherlyError::EventFull { event_id: 1 })
        );
    }

    #[test]
    fn test_confirmed_lineage_conflicts() {
        let confirmed = lineage(RegistrationStatus::Confirmed);
        assert_matches!(
            evaluate_register(1, 2, Some(&confirmed), 5),
            Err(GatherlyError::AlreadyRegistered {
                user_id: 2,
                event_id: 1
            })
        );
    }

    #[test]
    fn test_waitlisted_lineage_conflicts() {
        // No self-service promotion: the waitlisted lineage is already active
        let waitlisted = lineage(RegistrationStatus::Waitlisted);
        assert_matches!(
            evaluate_register(1, 2, Some(&waitlisted), 5),
            Err(GatherlyError::AlreadyRegistered {
                user_id: 2,
                event_id: 1
            })
        );
    }
}
