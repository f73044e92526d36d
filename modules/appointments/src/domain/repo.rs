use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbkit::StorageError;

use crate::contract::model::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};

/// Column values the stored row must still hold for a conditional update to apply.
/// `None` fields are not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateGuard {
    pub status: Option<AppointmentStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Persistence port for appointments.
#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, StorageError>;
    /// Ordered by id.
    async fn list_all(&self) -> Result<Vec<Appointment>, StorageError>;
    /// A dangling user/property id surfaces as `StorageError::ForeignKeyViolation`.
    async fn insert(
        &self,
        new_appointment: NewAppointment,
        at: DateTime<Utc>,
    ) -> Result<Appointment, StorageError>;
    /// Writes only the patched columns plus `updated_at`, and only while the row
    /// matches `guard`. `None` when no row matched (gone, or changed underneath).
    async fn update(
        &self,
        id: i32,
        patch: AppointmentPatch,
        guard: UpdateGuard,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StorageError>;
    async fn delete(&self, id: i32) -> Result<bool, StorageError>;
}
