use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewProperty, Property, PropertyPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::PropertiesRepository;

/// Business rules for properties; talks to storage only through the repository port.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn PropertiesRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_area: f64,
    pub max_address_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_area: 1.0,
            max_address_length: 255,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn PropertiesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "properties.service.get_property", skip(self), fields(property_id = %id))]
    pub async fn get_property(&self, id: i32) -> Result<Option<Property>, DomainError> {
        debug!("Getting property by id");
        Ok(self.repo.find_by_id(id).await?)
    }

    #[instrument(name = "properties.service.list_properties", skip(self))]
    pub async fn list_properties(&self) -> Result<Vec<Property>, DomainError> {
        let properties = self.repo.list_all().await?;
        debug!("Listed {} properties", properties.len());
        Ok(properties)
    }

    #[instrument(
        name = "properties.service.create_property",
        skip(self),
        fields(area = new_property.area)
    )]
    pub async fn create_property(&self, new_property: NewProperty) -> Result<Property, DomainError> {
        info!("Creating new property");

        self.validate_area(new_property.area)?;
        self.validate_address(&new_property.address)?;

        let property = self.repo.insert(new_property, Utc::now()).await?;
        info!("Successfully created property with id={}", property.id);
        Ok(property)
    }

    #[instrument(name = "properties.service.update_property", skip(self), fields(property_id = %id))]
    pub async fn update_property(
        &self,
        id: i32,
        patch: PropertyPatch,
    ) -> Result<Option<Property>, DomainError> {
        info!("Updating property");

        if self.repo.find_by_id(id).await?.is_none() {
            debug!("Property not found; nothing to update");
            return Ok(None);
        }

        if let Some(area) = patch.area {
            self.validate_area(area)?;
        }
        if let Some(ref address) = patch.address {
            self.validate_address(address)?;
        }

        let updated = self.repo.update(id, patch, Utc::now()).await?;
        if updated.is_some() {
            info!("Successfully updated property");
        }
        Ok(updated)
    }

    #[instrument(name = "properties.service.delete_property", skip(self), fields(property_id = %id))]
    pub async fn delete_property(&self, id: i32) -> Result<bool, DomainError> {
        info!("Deleting property");
        let deleted = self.repo.delete(id).await?;
        info!(deleted, "Delete finished");
        Ok(deleted)
    }

    fn validate_area(&self, area: f64) -> Result<(), DomainError> {
        if !area.is_finite() || area < self.config.min_area {
            return Err(DomainError::invalid_area(area, self.config.min_area));
        }
        Ok(())
    }

    fn validate_address(&self, address: &str) -> Result<(), DomainError> {
        if address.trim().is_empty() {
            return Err(DomainError::EmptyAddress);
        }
        let len = address.chars().count();
        if len > self.config.max_address_length {
            return Err(DomainError::address_too_long(
                len,
                self.config.max_address_length,
            ));
        }
        Ok(())
    }
}
