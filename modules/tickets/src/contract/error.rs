use thiserror::Error;

/// Errors that are safe to expose to other crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketsError {
    #[error("Ticket not found")]
    NotFound { id: String },

    #[error("{message}")]
    Validation { message: String },
}

impl TicketsError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for TicketsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            TicketNotFound { id } => Self::not_found(id),
            e @ (IdRequired
            | MissingFields
            | InvalidMethod { .. }
            | EmptyField { .. }
            | InvalidStatus { .. }) => Self::validation(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn domain_errors_map_to_contract_kinds() {
        assert_eq!(
            TicketsError::from(DomainError::ticket_not_found("abc")),
            TicketsError::not_found("abc")
        );
        for (domain, message) in [
            (DomainError::id_required(), "Id is required"),
            (DomainError::missing_fields(), "Name and description are required"),
            (DomainError::invalid_method(None), "Invalid method"),
            (DomainError::empty_field("name"), "name cannot be empty"),
            (DomainError::invalid_status("yes"), "Invalid status value"),
        ] {
            assert_eq!(TicketsError::from(domain), TicketsError::validation(message));
        }
    }
}
