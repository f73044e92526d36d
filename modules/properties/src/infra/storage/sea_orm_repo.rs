use chrono::{DateTime, Utc};
use dbkit::StorageError;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryOrder, Set, Unchanged,
};

use crate::contract::model::{NewProperty, Property, PropertyPatch};
use crate::domain::repo::PropertiesRepository;
use crate::infra::storage::entity::{ActiveModel as PropertyAM, Column, Entity as PropertyEntity};

/// SeaORM adapter; `C` may be a connection or a transaction.
pub struct SeaOrmPropertiesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmPropertiesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> PropertiesRepository for SeaOrmPropertiesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, StorageError> {
        let found = PropertyEntity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Property>, StorageError> {
        let rows = PropertyEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(
        &self,
        new_property: NewProperty,
        at: DateTime<Utc>,
    ) -> Result<Property, StorageError> {
        let m = PropertyAM {
            id: NotSet,
            area: Set(new_property.area),
            address: Set(new_property.address),
            created_at: Set(at),
            updated_at: Set(at),
        };
        Ok(m.insert(&self.conn).await?.into())
    }

    async fn update(
        &self,
        id: i32,
        patch: PropertyPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Property>, StorageError> {
        let m = PropertyAM {
            id: Unchanged(id),
            area: patch.area.map_or(NotSet, Set),
            address: patch.address.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(at),
        };
        match m.update(&self.conn).await {
            Ok(stored) => Ok(Some(stored.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let res = PropertyEntity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
