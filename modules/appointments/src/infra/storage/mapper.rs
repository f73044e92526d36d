use crate::contract::model::{Appointment, AppointmentStatus};
use crate::infra::storage::entity::{Model as AppointmentEntity, Status};

impl From<Status> for AppointmentStatus {
    fn from(s: Status) -> Self {
        match s {
            Status::Pending => Self::Pending,
            Status::Confirmed => Self::Confirmed,
            Status::Cancelled => Self::Cancelled,
        }
    }
}

impl From<AppointmentStatus> for Status {
    fn from(s: AppointmentStatus) -> Self {
        match s {
            AppointmentStatus::Pending => Self::Pending,
            AppointmentStatus::Confirmed => Self::Confirmed,
            AppointmentStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<AppointmentEntity> for Appointment {
    fn from(e: AppointmentEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            start_date: e.start_date,
            end_date: e.end_date,
            id_user: e.id_user,
            id_property: e.id_property,
            status: e.status.into(),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
