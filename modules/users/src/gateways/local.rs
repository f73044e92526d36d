use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UsersApi,
    error::UsersError,
    model::{NewUser, User, UserPatch},
};
use crate::domain::service::Service;

/// Local implementation of the UsersApi trait that delegates to the domain service
pub struct UsersLocalClient {
    service: Arc<Service>,
}

impl UsersLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersApi for UsersLocalClient {
    async fn get_user(&self, id: i32) -> Result<User, UsersError> {
        self.service
            .get_user(id)
            .await?
            .ok_or_else(|| UsersError::not_found(id))
    }

    async fn user_exists(&self, id: i32) -> Result<bool, UsersError> {
        Ok(self.service.get_user(id).await?.is_some())
    }

    async fn list_users(&self) -> Result<Vec<User>, UsersError> {
        self.service.list_users().await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<User, UsersError> {
        self.service
            .update_user(id, patch)
            .await?
            .ok_or_else(|| UsersError::not_found(id))
    }

    async fn delete_user(&self, id: i32) -> Result<(), UsersError> {
        if self.service.delete_user(id).await? {
            Ok(())
        } else {
            Err(UsersError::not_found(id))
        }
    }
}
