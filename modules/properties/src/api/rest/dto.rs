use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{NewProperty, Property, PropertyPatch};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: i32,
    pub area: f64,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyReq {
    pub area: f64,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePropertyReq {
    pub area: Option<f64>,
    pub address: Option<String>,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            area: p.area,
            address: p.address,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<CreatePropertyReq> for NewProperty {
    fn from(req: CreatePropertyReq) -> Self {
        Self {
            area: req.area,
            address: req.address,
        }
    }
}

impl From<UpdatePropertyReq> for PropertyPatch {
    fn from(req: UpdatePropertyReq) -> Self {
        Self {
            area: req.area,
            address: req.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_area_is_accepted() {
        let req: CreatePropertyReq =
            serde_json::from_str(r#"{"area":100,"address":"123 Main St"}"#).unwrap();
        assert_eq!(req.area, 100.0);
    }

    #[test]
    fn string_area_is_rejected() {
        let res: Result<CreatePropertyReq, _> =
            serde_json::from_str(r#"{"area":"big","address":"123 Main St"}"#);
        assert!(res.is_err());
    }
}
