use async_trait::async_trait;

use crate::contract::{
    error::UsersError,
    model::{NewUser, User, UserPatch},
};

/// Public API of the users module for other modules.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Get a user by id; `NotFound` when absent.
    async fn get_user(&self, id: i32) -> Result<User, UsersError>;

    /// Whether a user with this id currently exists.
    async fn user_exists(&self, id: i32) -> Result<bool, UsersError>;

    async fn list_users(&self) -> Result<Vec<User>, UsersError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError>;

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<User, UsersError>;

    async fn delete_user(&self, id: i32) -> Result<(), UsersError>;
}
