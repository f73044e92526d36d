//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use chrono::{DateTime, Utc};
use dbkit::StorageError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StorageError> {
        let found = UserEntity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        let rows = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StorageError> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn insert(&self, new_user: NewUser, at: DateTime<Utc>) -> Result<User, StorageError> {
        let m = UserAM {
            id: NotSet,
            email: Set(new_user.email),
            name: Set(new_user.name),
            created_at: Set(at),
            updated_at: Set(at),
        };
        let stored = m.insert(&self.conn).await?;
        Ok(stored.into())
    }

    async fn update(
        &self,
        id: i32,
        patch: UserPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError> {
        // NotSet columns stay out of the UPDATE statement.
        let m = UserAM {
            id: Unchanged(id),
            email: patch.email.map_or(NotSet, Set),
            name: patch.name.map_or(NotSet, Set),
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
        let res = UserEntity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }
}
