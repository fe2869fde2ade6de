use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operation tag a create request may carry.
pub const CREATE_TICKET_TAG: &str = "createTicket";

/// A support ticket. Pure model, no HTTP concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub status: bool,
}

/// Ticket without its description, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortTicket {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: bool,
}

/// Data for creating a new ticket
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub name: String,
    pub description: String,
    /// Operation tag; must be `createTicket` when present.
    pub method: Option<String>,
}

/// Partial update data for a ticket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}
