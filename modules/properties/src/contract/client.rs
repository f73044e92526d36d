use async_trait::async_trait;

use crate::contract::{
    error::PropertiesError,
    model::{NewProperty, Property, PropertyPatch},
};

/// In-process API of the properties module.
#[async_trait]
pub trait PropertiesApi: Send + Sync {
    /// `NotFound` when absent.
    async fn get_property(&self, id: i32) -> Result<Property, PropertiesError>;

    async fn property_exists(&self, id: i32) -> Result<bool, PropertiesError>;

    async fn list_properties(&self) -> Result<Vec<Property>, PropertiesError>;

    async fn create_property(&self, new_property: NewProperty)
        -> Result<Property, PropertiesError>;

    async fn update_property(
        &self,
        id: i32,
        patch: PropertyPatch,
    ) -> Result<Property, PropertiesError>;

    async fn delete_property(&self, id: i32) -> Result<(), PropertiesError>;
}
