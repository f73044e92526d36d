use serde::{Deserialize, Serialize};

/// HTTP ingress configuration (`modules.api_ingress`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// `host:port`; empty means `server.host:server.port`.
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Allowed origins; empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            cors_enabled: default_true(),
            cors_allowed_origins: Vec::new(),
            request_timeout_sec: default_request_timeout_sec(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: ApiIngressConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(cfg.bind_addr.is_empty());
        assert!(cfg.cors_enabled);
        assert!(cfg.cors_allowed_origins.is_empty());
        assert_eq!(cfg.request_timeout_sec, 30);
        assert_eq!(cfg.body_limit_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<ApiIngressConfig, _> =
            serde_json::from_value(serde_json::json!({ "enable_docs": true }));
        assert!(res.is_err());
    }
}
