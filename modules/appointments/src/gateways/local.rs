use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::AppointmentsApi,
    error::AppointmentsError,
    model::{Appointment, AppointmentPatch, NewAppointment},
};
use crate::domain::service::Service;

pub struct AppointmentsLocalClient {
    service: Arc<Service>,
}

impl AppointmentsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AppointmentsApi for AppointmentsLocalClient {
    async fn get_appointment(&self, id: i32) -> Result<Appointment, AppointmentsError> {
        self.service
            .get(id)
            .await?
            .ok_or(AppointmentsError::NotFound { id })
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentsError> {
        self.service.list().await.map_err(Into::into)
    }

    async fn create_appointment(
        &self,
        new_appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentsError> {
        self.service.create(new_appointment).await.map_err(Into::into)
    }

    async fn update_appointment(
        &self,
        id: i32,
        patch: AppointmentPatch,
    ) -> Result<Appointment, AppointmentsError> {
        self.service.update(id, patch).await.map_err(Into::into)
    }

    async fn delete_appointment(&self, id: i32) -> Result<(), AppointmentsError> {
        self.service.delete(id).await.map_err(Into::into)
    }
}
