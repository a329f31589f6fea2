//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::GatherlyError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub total_seats: i32,
    pub status: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Parse the stored status string
    pub fn status(&self) -> Result<EventStatus, GatherlyError> {
        self.status.parse()
    }

    /// Whether the event currently accepts registrations
    pub fn is_open_for_registration(&self) -> bool {
        matches!(
            self.status.parse(),
            Ok(EventStatus::Scheduled) | Ok(EventStatus::Ongoing)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub total_seats: i32,
    pub created_by: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = GatherlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(EventStatus::Scheduled),
            "ongoing" => Ok(EventStatus::Ongoing),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(GatherlyError::InvalidInput(format!(
                "Unknown event status: {other}"
            ))),
        }
    }
}

/// Seat availability snapshot for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAvailability {
    pub total_seats: i32,
    pub available_seats: i64,
    pub occupancy_rate: f64,
}

/// Per-status registration counts plus availability, for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStatistics {
    pub event_id: i64,
    pub total_seats: i32,
    pub confirmed: i64,
    pub cancelled: i64,
    pub waitlisted: i64,
    pub available_seats: i64,
    pub occupancy_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(status: &str) -> Event {
        Event {
            id: 1,
            title: "Swing Night".to_string(),
            description: None,
            event_date: Utc::now(),
            location: None,
            total_seats: 10,
            status: status.to_string(),
            created_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EventStatus::Scheduled,
            EventStatus::Ongoing,
            EventStatus::Completed,
            EventStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
        }
        assert!("postponed".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_registration_window() {
        assert!(sample_event("scheduled").is_open_for_registration());
        assert!(sample_event("ongoing").is_open_for_registration());
        assert!(!sample_event("completed").is_open_for_registration());
        assert!(!sample_event("cancelled").is_open_for_registration());
    }
}
