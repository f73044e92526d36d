use chrono::{DateTime, Utc};

/// A rentable property. `area` is in square meters.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i32,
    pub area: f64,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub area: f64,
    pub address: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyPatch {
    pub area: Option<f64>,
    pub address: Option<String>,
}
