use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the tickets module (`modules.tickets`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketsConfig {
    /// Start with a handful of demo tickets.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    /// Reject creates that omit the `createTicket` operation tag.
    #[serde(default)]
    pub require_operation_tag: bool,
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            require_operation_tag: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl From<&TicketsConfig> for ServiceConfig {
    fn from(cfg: &TicketsConfig) -> Self {
        ServiceConfig {
            require_operation_tag: cfg.require_operation_tag,
        }
    }
}
