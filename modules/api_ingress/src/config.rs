use serde::{Deserialize, Serialize};

/// HTTP host configuration, read from the `api_ingress` module section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// `host:port` to bind; empty => use `server.host:server.port`.
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Directory served for unmatched GET requests (e.g. a bundled frontend).
    #[serde(default)]
    pub static_dir: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            cors_enabled: default_true(),
            static_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    2 * 1024 * 1024
}
