use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Ticket not found")]
    TicketNotFound { id: String },

    #[error("Id is required")]
    IdRequired,

    #[error("Name and description are required")]
    MissingFields,

    #[error("Invalid method")]
    InvalidMethod { method: Option<String> },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid status value")]
    InvalidStatus { value: String },
}

impl DomainError {
    pub fn ticket_not_found(id: impl Into<String>) -> Self {
        Self::TicketNotFound { id: id.into() }
    }

    pub fn id_required() -> Self {
        Self::IdRequired
    }

    pub fn missing_fields() -> Self {
        Self::MissingFields
    }

    pub fn invalid_method(method: Option<String>) -> Self {
        Self::InvalidMethod { method }
    }

    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    /// True for errors caused by caller input rather than missing data.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::TicketNotFound { .. })
    }
}
