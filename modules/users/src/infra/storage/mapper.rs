use crate::contract::model::User;
use crate::infra::storage::entity::Model as UserEntity;

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: e.id,
            email: e.email,
            name: e.name,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
