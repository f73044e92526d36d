use std::fmt;

use chrono::{DateTime, Utc};

/// Appointment workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Staying in the same state is always allowed; nothing leaves `Cancelled`.
    pub fn can_transition_to(self, next: Self) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Pending)
                | (Confirmed, Confirmed)
                | (Cancelled, Cancelled)
                | (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: i32,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub id_user: i32,
    pub id_property: i32,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub id_user: i32,
    pub id_property: i32,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentPatch {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub id_user: Option<i32>,
    pub id_property: Option<i32>,
    pub status: Option<AppointmentStatus>,
}
