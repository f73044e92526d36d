use async_trait::async_trait;

use crate::contract::{
    error::AppointmentsError,
    model::{Appointment, AppointmentPatch, NewAppointment},
};

/// In-process API of the appointments module.
#[async_trait]
pub trait AppointmentsApi: Send + Sync {
    async fn get_appointment(&self, id: i32) -> Result<Appointment, AppointmentsError>;

    async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentsError>;

    async fn create_appointment(
        &self,
        new_appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentsError>;

    async fn update_appointment(
        &self,
        id: i32,
        patch: AppointmentPatch,
    ) -> Result<Appointment, AppointmentsError>;

    async fn delete_appointment(&self, id: i32) -> Result<(), AppointmentsError>;
}
