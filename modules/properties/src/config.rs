use serde::{Deserialize, Serialize};

/// `modules.properties` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertiesConfig {
    #[serde(default = "default_min_area")]
    pub min_area: f64,
    #[serde(default = "default_max_address_length")]
    pub max_address_length: usize,
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            min_area: default_min_area(),
            max_address_length: default_max_address_length(),
        }
    }
}

fn default_min_area() -> f64 {
    1.0
}

fn default_max_address_length() -> usize {
    255
}
