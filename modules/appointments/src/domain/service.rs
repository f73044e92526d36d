use std::sync::Arc;

use chrono::Utc;
use dbkit::StorageError;
use properties::contract::PropertiesApi;
use tracing::{debug, info, instrument, warn};
use users::contract::UsersApi;

use crate::contract::model::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
use crate::domain::error::DomainError;
use crate::domain::repo::{AppointmentsRepository, UpdateGuard};

/// Conditional writes retried after losing a race before reporting a conflict.
const UPDATE_ATTEMPTS: u32 = 3;

/// Appointment rules: dates, status workflow and user/property references.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn AppointmentsRepository>,
    users: Arc<dyn UsersApi>,
    properties: Arc<dyn PropertiesApi>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Require `end_date > start_date`.
    pub enforce_date_order: bool,
    /// Re-check user/property existence when an update changes them.
    pub check_references_on_update: bool,
    pub max_title_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enforce_date_order: true,
            check_references_on_update: true,
            max_title_length: 255,
        }
    }
}

impl Service {
    pub fn new(
        repo: Arc<dyn AppointmentsRepository>,
        users: Arc<dyn UsersApi>,
        properties: Arc<dyn PropertiesApi>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            users,
            properties,
            config,
        }
    }

    #[instrument(name = "appointments.service.get", skip(self), fields(appointment_id = %id))]
    pub async fn get(&self, id: i32) -> Result<Option<Appointment>, DomainError> {
        debug!("Getting appointment by id");
        Ok(self.repo.find_by_id(id).await?)
    }

    #[instrument(name = "appointments.service.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Appointment>, DomainError> {
        let all = self.repo.list_all().await?;
        debug!("Listed {} appointments", all.len());
        Ok(all)
    }

    #[instrument(
        name = "appointments.service.create",
        skip(self, new_appointment),
        fields(user_id = new_appointment.id_user, property_id = new_appointment.id_property)
    )]
    pub async fn create(&self, new_appointment: NewAppointment) -> Result<Appointment, DomainError> {
        info!("Creating new appointment");

        self.validate_title(&new_appointment.title)?;
        if new_appointment.status == AppointmentStatus::Cancelled {
            return Err(DomainError::validation(
                "status",
                "a new appointment cannot be cancelled",
            ));
        }
        self.validate_dates(&new_appointment.start_date, &new_appointment.end_date)?;

        self.ensure_user(new_appointment.id_user).await?;
        self.ensure_property(new_appointment.id_property).await?;

        let (id_user, id_property) = (new_appointment.id_user, new_appointment.id_property);
        let created = match self.repo.insert(new_appointment, Utc::now()).await {
            Ok(a) => a,
            Err(StorageError::ForeignKeyViolation(msg)) => {
                warn!(%msg, "Reference vanished between check and insert");
                return Err(self.missing_reference(id_user, id_property).await);
            }
            Err(e) => return Err(e.into()),
        };

        info!("Successfully created appointment with id={}", created.id);
        Ok(created)
    }

    #[instrument(name = "appointments.service.update", skip(self, patch), fields(appointment_id = %id))]
    pub async fn update(&self, id: i32, patch: AppointmentPatch) -> Result<Appointment, DomainError> {
        info!("Updating appointment");

        let mut current = self.load(id).await?;

        if let Some(ref title) = patch.title {
            self.validate_title(title)?;
        }

        if self.config.check_references_on_update {
            if let Some(id_user) = patch.id_user.filter(|u| *u != current.id_user) {
                self.ensure_user(id_user).await?;
            }
            if let Some(id_property) = patch.id_property.filter(|p| *p != current.id_property) {
                self.ensure_property(id_property).await?;
            }
        }

        for attempt in 1..=UPDATE_ATTEMPTS {
            self.validate_against(&current, &patch)?;

            let guard = self.guard_for(&current, &patch);
            match self.repo.update(id, patch.clone(), guard, Utc::now()).await {
                Ok(Some(updated)) => {
                    info!("Successfully updated appointment");
                    return Ok(updated);
                }
                Ok(None) => {
                    debug!(attempt, "Stored appointment moved on; re-reading");
                    current = self.load(id).await?;
                }
                Err(StorageError::ForeignKeyViolation(msg)) => {
                    warn!(%msg, "Update points at a missing reference");
                    let id_user = patch.id_user.unwrap_or(current.id_user);
                    let id_property = patch.id_property.unwrap_or(current.id_property);
                    return Err(self.missing_reference(id_user, id_property).await);
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!("Giving up after {UPDATE_ATTEMPTS} conflicting attempts");
        Err(DomainError::ConcurrentUpdate { id })
    }

    #[instrument(name = "appointments.service.delete", skip(self), fields(appointment_id = %id))]
    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting appointment");
        if self.repo.delete(id).await? {
            info!("Appointment deleted");
            Ok(())
        } else {
            Err(DomainError::not_found(id))
        }
    }

    async fn load(&self, id: i32) -> Result<Appointment, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// Rules that depend on the stored row: status workflow and merged date order.
    fn validate_against(
        &self,
        current: &Appointment,
        patch: &AppointmentPatch,
    ) -> Result<(), DomainError> {
        if let Some(next) = patch.status {
            if !current.status.can_transition_to(next) {
                return Err(DomainError::InvalidStatusTransition {
                    from: current.status,
                    to: next,
                });
            }
        }
        let start = patch.start_date.unwrap_or(current.start_date);
        let end = patch.end_date.unwrap_or(current.end_date);
        self.validate_dates(&start, &end)
    }

    /// Pin the stored columns that `validate_against` read but the patch does not overwrite.
    fn guard_for(&self, current: &Appointment, patch: &AppointmentPatch) -> UpdateGuard {
        let check_dates = self.config.enforce_date_order;
        UpdateGuard {
            status: patch.status.map(|_| current.status),
            start_date: (check_dates && patch.start_date.is_none() && patch.end_date.is_some())
                .then_some(current.start_date),
            end_date: (check_dates && patch.end_date.is_none() && patch.start_date.is_some())
                .then_some(current.end_date),
        }
    }

    async fn ensure_user(&self, id: i32) -> Result<(), DomainError> {
        if self.users.user_exists(id).await? {
            Ok(())
        } else {
            debug!(user_id = id, "Referenced user does not exist");
            Err(DomainError::user_not_found(id))
        }
    }

    async fn ensure_property(&self, id: i32) -> Result<(), DomainError> {
        if self.properties.property_exists(id).await? {
            Ok(())
        } else {
            debug!(property_id = id, "Referenced property does not exist");
            Err(DomainError::property_not_found(id))
        }
    }

    /// Work out which reference a foreign-key failure was about.
    async fn missing_reference(&self, id_user: i32, id_property: i32) -> DomainError {
        match self.ensure_user(id_user).await {
            Err(e) => e,
            Ok(()) => match self.ensure_property(id_property).await {
                Err(e) => e,
                Ok(()) => DomainError::database("foreign key violation with existing references"),
            },
        }
    }

    fn validate_title(&self, title: &str) -> Result<(), DomainError> {
        let len = title.chars().count();
        if len > self.config.max_title_length {
            return Err(DomainError::validation(
                "title",
                format!(
                    "too long: {len} characters (max: {})",
                    self.config.max_title_length
                ),
            ));
        }
        Ok(())
    }

    fn validate_dates(
        &self,
        start: &chrono::DateTime<Utc>,
        end: &chrono::DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.config.enforce_date_order && end <= start {
            return Err(DomainError::InvalidDateRange {
                start: *start,
                end: *end,
            });
        }
        Ok(())
    }
}
