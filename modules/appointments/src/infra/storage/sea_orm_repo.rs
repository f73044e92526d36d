use chrono::{DateTime, Utc};
use dbkit::StorageError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use crate::contract::model::{Appointment, AppointmentPatch, NewAppointment};
use crate::domain::repo::{AppointmentsRepository, UpdateGuard};
use crate::infra::storage::entity::{
    ActiveModel as AppointmentAM, Column, Entity as AppointmentEntity, Status,
};

pub struct SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> AppointmentsRepository for SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, StorageError> {
        let found = AppointmentEntity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, StorageError> {
        let rows = AppointmentEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(
        &self,
        new_appointment: NewAppointment,
        at: DateTime<Utc>,
    ) -> Result<Appointment, StorageError> {
        let m = AppointmentAM {
            id: NotSet,
            title: Set(new_appointment.title),
            start_date: Set(new_appointment.start_date),
            end_date: Set(new_appointment.end_date),
            id_user: Set(new_appointment.id_user),
            id_property: Set(new_appointment.id_property),
            status: Set(new_appointment.status.into()),
            created_at: Set(at),
            updated_at: Set(at),
        };
        Ok(m.insert(&self.conn).await?.into())
    }

    async fn update(
        &self,
        id: i32,
        patch: AppointmentPatch,
        guard: UpdateGuard,
        at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StorageError> {
        let m = AppointmentAM {
            id: Unchanged(id),
            title: patch.title.map_or(NotSet, Set),
            start_date: patch.start_date.map_or(NotSet, Set),
            end_date: patch.end_date.map_or(NotSet, Set),
            id_user: patch.id_user.map_or(NotSet, Set),
            id_property: patch.id_property.map_or(NotSet, Set),
            status: patch.status.map_or(NotSet, |s| Set(s.into())),
            created_at: NotSet,
            updated_at: Set(at),
        };

        let mut stmt = AppointmentEntity::update(m);
        if let Some(status) = guard.status {
            stmt = stmt.filter(Column::Status.eq(Status::from(status)));
        }
        if let Some(start) = guard.start_date {
            stmt = stmt.filter(Column::StartDate.eq(start));
        }
        if let Some(end) = guard.end_date {
            stmt = stmt.filter(Column::EndDate.eq(end));
        }

        match stmt.exec(&self.conn).await {
            Ok(stored) => Ok(Some(stored.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let res = AppointmentEntity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
