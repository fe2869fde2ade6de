use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewTicket, ShortTicket, TicketPatch};
use crate::domain::error::DomainError;
use crate::domain::ticket::parse_status;

/// REST DTO for a ticket in listings (no description)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortTicketDto {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: bool,
}

/// REST DTO for creating a ticket. Missing fields are reported by the domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTicketReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// REST DTO for updating a ticket (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTicketReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusInput>,
}

/// Status as sent by clients: a JSON boolean, or its text form from forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusInput {
    Flag(bool),
    Text(String),
    Other(serde_json::Value),
}

impl StatusInput {
    pub fn to_bool(&self) -> Result<bool, DomainError> {
        match self {
            Self::Flag(flag) => Ok(*flag),
            Self::Text(text) => parse_status(text),
            Self::Other(value) => Err(DomainError::invalid_status(value.to_string())),
        }
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<ShortTicket> for ShortTicketDto {
    fn from(ticket: ShortTicket) -> Self {
        Self {
            id: ticket.id,
            name: ticket.name,
            created_at: ticket.created_at,
            status: ticket.status,
        }
    }
}

impl From<CreateTicketReq> for NewTicket {
    fn from(req: CreateTicketReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            description: req.description.unwrap_or_default(),
            method: req.method,
        }
    }
}

impl TryFrom<UpdateTicketReq> for TicketPatch {
    type Error = DomainError;

    fn try_from(req: UpdateTicketReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            description: req.description,
            status: req.status.as_ref().map(StatusInput::to_bool).transpose()?,
        })
    }
}
