//! Registration model
//!
//! A registration is the single mutable record of one user's relationship to
//! one event. Register/cancel/re-register cycles mutate the same row; normal
//! flow never deletes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: String,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Parse the stored status string
    pub fn status(&self) -> Result<RegistrationStatus, GatherlyError> {
        self.status.parse()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == RegistrationStatus::Confirmed.as_str()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == RegistrationStatus::Cancelled.as_str()
    }

    pub fn is_waitlisted(&self) -> bool {
        self.status == RegistrationStatus::Waitlisted.as_str()
    }
}

/// Registration lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
    Waitlisted,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
            RegistrationStatus::Waitlisted => "waitlisted",
        }
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = GatherlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            "waitlisted" => Ok(RegistrationStatus::Waitlisted),
            other => Err(GatherlyError::InvalidInput(format!(
                "Unknown registration status: {other}"
            ))),
        }
    }
}

/// Answer to "is this user registered for this event?"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationStatusCheck {
    pub registered: bool,
    pub status: Option<String>,
    pub registration_id: Option<i64>,
    pub registration_date: Option<DateTime<Utc>>,
}

impl RegistrationStatusCheck {
    /// No lineage exists for the (user, event) pair
    pub fn not_registered() -> Self {
        Self {
            registered: false,
            status: None,
            registration_id: None,
            registration_date: None,
        }
    }

    /// Snapshot of an existing lineage; only a confirmed one counts as registered
    pub fn from_registration(registration: &Registration) -> Self {
        Self {
            registered: registration.is_confirmed(),
            status: Some(registration.status.clone()),
            registration_id: Some(registration.id),
            registration_date: Some(registration.registration_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registration(status: RegistrationStatus) -> Registration {
        Registration {
            id: 42,
            event_id: 7,
            user_id: 3,
            status: status.as_str().to_string(),
            registration_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            RegistrationStatus::Confirmed,
            RegistrationStatus::Cancelled,
            RegistrationStatus::Waitlisted,
        ] {
            assert_eq!(
                status.as_str().parse::<RegistrationStatus>().unwrap(),
                status
            );
        }
        assert!("pending".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(sample_registration(RegistrationStatus::Confirmed).is_confirmed());
        assert!(sample_registration(RegistrationStatus::Cancelled).is_cancelled());
        assert!(sample_registration(RegistrationStatus::Waitlisted).is_waitlisted());
    }

    #[test]
    fn test_status_check_from_registration() {
        let confirmed = sample_registration(RegistrationStatus::Confirmed);
        let check = RegistrationStatusCheck::from_registration(&confirmed);
        assert!(check.registered);
        assert_eq!(check.registration_id, Some(42));
        assert_eq!(check.status.as_deref(), Some("confirmed"));

        let cancelled = sample_registration(RegistrationStatus::Cancelled);
        let check = RegistrationStatusCheck::from_registration(&cancelled);
        assert!(!check.registered);
        assert_eq!(check.status.as_deref(), Some("cancelled"));

        let absent = RegistrationStatusCheck::not_registered();
        assert!(!absent.registered);
        assert!(absent.registration_id.is_none());
    }
}
