use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbkit::StorageError;

use crate::contract::model::{NewProperty, Property, PropertyPatch};

/// Persistence port for properties.
#[async_trait]
pub trait PropertiesRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Property>, StorageError>;
    /// Ordered by id.
    async fn list_all(&self) -> Result<Vec<Property>, StorageError>;
    async fn insert(&self, new_property: NewProperty, at: DateTime<Utc>)
        -> Result<Property, StorageError>;
    /// Writes only the patched columns plus `updated_at`. `None` when the row is gone.
    async fn update(
        &self,
        id: i32,
        patch: PropertyPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<Property>, StorageError>;
    async fn delete(&self, id: i32) -> Result<bool, StorageError>;
}
