use serde::{Deserialize, Serialize};

/// `modules.appointments` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppointmentsConfig {
    #[serde(default = "default_true")]
    pub enforce_date_order: bool,
    #[serde(default = "default_true")]
    pub check_references_on_update: bool,
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        Self {
            enforce_date_order: true,
            check_references_on_update: true,
            max_title_length: default_max_title_length(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_title_length() -> usize {
    255
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: AppointmentsConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(cfg.enforce_date_order);
        assert!(cfg.check_references_on_update);
        assert_eq!(cfg.max_title_length, 255);
    }

    #[test]
    fn flags_can_be_disabled() {
        let cfg: AppointmentsConfig =
            serde_json::from_value(serde_json::json!({"enforce_date_order": false})).unwrap();
        assert!(!cfg.enforce_date_order);
        assert!(cfg.check_references_on_update);
    }
}
