use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::PropertiesApi,
    error::PropertiesError,
    model::{NewProperty, Property, PropertyPatch},
};
use crate::domain::service::Service;

/// `PropertiesApi` backed by the in-process domain service.
pub struct PropertiesLocalClient {
    service: Arc<Service>,
}

impl PropertiesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PropertiesApi for PropertiesLocalClient {
    async fn get_property(&self, id: i32) -> Result<Property, PropertiesError> {
        self.service
            .get_property(id)
            .await?
            .ok_or(PropertiesError::NotFound { id })
    }

    async fn property_exists(&self, id: i32) -> Result<bool, PropertiesError> {
        Ok(self.service.get_property(id).await?.is_some())
    }

    async fn list_properties(&self) -> Result<Vec<Property>, PropertiesError> {
        self.service.list_properties().await.map_err(Into::into)
    }

    async fn create_property(
        &self,
        new_property: NewProperty,
    ) -> Result<Property, PropertiesError> {
        self.service
            .create_property(new_property)
            .await
            .map_err(Into::into)
    }

    async fn update_property(
        &self,
        id: i32,
        patch: PropertyPatch,
    ) -> Result<Property, PropertiesError> {
        self.service
            .update_property(id, patch)
            .await?
            .ok_or(PropertiesError::NotFound { id })
    }

    async fn delete_property(&self, id: i32) -> Result<(), PropertiesError> {
        match self.service.delete_property(id).await? {
            true => Ok(()),
            false => Err(PropertiesError::NotFound { id }),
        }
    }
}
