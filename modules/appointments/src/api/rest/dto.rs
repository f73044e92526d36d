use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};

/// Wire form of [`AppointmentStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusDto {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl From<StatusDto> for AppointmentStatus {
    fn from(s: StatusDto) -> Self {
        match s {
            StatusDto::Pending => Self::Pending,
            StatusDto::Confirmed => Self::Confirmed,
            StatusDto::Cancelled => Self::Cancelled,
        }
    }
}

impl From<AppointmentStatus> for StatusDto {
    fn from(s: AppointmentStatus) -> Self {
        match s {
            AppointmentStatus::Pending => Self::Pending,
            AppointmentStatus::Confirmed => Self::Confirmed,
            AppointmentStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: i32,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub id_user: i32,
    pub id_property: i32,
    pub status: StatusDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create body. `userId`/`propertyId` are accepted for the reference fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentReq {
    /// Absent and `null` both mean an empty title.
    #[serde(default)]
    pub title: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(alias = "userId")]
    pub id_user: i32,
    #[serde(alias = "propertyId")]
    pub id_property: i32,
    #[serde(default)]
    pub status: StatusDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentReq {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(alias = "userId")]
    pub id_user: Option<i32>,
    #[serde(alias = "propertyId")]
    pub id_property: Option<i32>,
    pub status: Option<StatusDto>,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            start_date: a.start_date,
            end_date: a.end_date,
            id_user: a.id_user,
            id_property: a.id_property,
            status: a.status.into(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<CreateAppointmentReq> for NewAppointment {
    fn from(req: CreateAppointmentReq) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            id_user: req.id_user,
            id_property: req.id_property,
            status: req.status.into(),
        }
    }
}

impl From<UpdateAppointmentReq> for AppointmentPatch {
    fn from(req: UpdateAppointmentReq) -> Self {
        Self {
            title: req.title,
            start_date: req.start_date,
            end_date: req.end_date,
            id_user: req.id_user,
            id_property: req.id_property,
            status: req.status.map(Into::into),
        }
    }
}
