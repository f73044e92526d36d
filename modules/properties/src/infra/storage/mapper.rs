use crate::contract::model::Property;
use crate::infra::storage::entity::Model as PropertyEntity;

impl From<PropertyEntity> for Property {
    fn from(e: PropertyEntity) -> Self {
        Self {
            id: e.id,
            area: e.area,
            address: e.address,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
