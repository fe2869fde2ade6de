use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{ShortTicket, Ticket, TicketPatch, CREATE_TICKET_TAG};
use crate::domain::error::DomainError;

impl Ticket {
    /// Build a fresh open ticket stamped with the current time.
    pub fn create(name: &str, description: &str) -> Result<Self, DomainError> {
        Self::create_at(name, description, Utc::now())
    }

    pub(crate) fn create_at(
        name: &str,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if is_blank(name) || is_blank(description) {
            return Err(DomainError::missing_fields());
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: description.to_owned(),
            created_at,
            status: false,
        })
    }

    /// Listing projection: everything except the description.
    pub fn short(&self) -> ShortTicket {
        ShortTicket {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            status: self.status,
        }
    }

    /// Merge a patch. Validates first, so a rejected patch changes nothing.
    pub fn apply(&mut self, patch: TicketPatch) -> Result<(), DomainError> {
        validate_patch(&patch)?;
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }
}

pub fn validate_patch(patch: &TicketPatch) -> Result<(), DomainError> {
    if patch.name.as_deref().is_some_and(is_blank) {
        return Err(DomainError::empty_field("name"));
    }
    if patch.description.as_deref().is_some_and(is_blank) {
        return Err(DomainError::empty_field("description"));
    }
    Ok(())
}

/// Check the operation tag of a create request.
///
/// A supplied tag must be `createTicket`; a missing tag is accepted unless `required`.
pub fn check_operation_tag(method: Option<&str>, required: bool) -> Result<(), DomainError> {
    match method {
        Some(CREATE_TICKET_TAG) => Ok(()),
        None if !required => Ok(()),
        other => Err(DomainError::invalid_method(other.map(str::to_owned))),
    }
}

/// Parse the textual encoding of a status flag (`"true"` / `"false"`).
pub fn parse_status(raw: &str) -> Result<bool, DomainError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DomainError::invalid_status(raw)),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_identity_and_defaults() {
        let before = Utc::now();
        let ticket = Ticket::create("Printer broken", "Floor 3").unwrap();

        assert_eq!(ticket.name, "Printer broken");
        assert_eq!(ticket.description, "Floor 3");
        assert!(!ticket.status);
        assert!(ticket.created_at >= before);
        assert_eq!(ticket.id.get_version_num(), 4);
    }

    #[test]
    fn create_rejects_blank_fields() {
        for (name, description) in [("", "x"), ("x", ""), ("   ", "x"), ("x", "\t\n")] {
            let err = Ticket::create(name, description).unwrap_err();
            assert_eq!(err, DomainError::MissingFields);
        }
    }

    #[test]
    fn ids_are_unique() {
        let a = Ticket::create("a", "b").unwrap();
        let b = Ticket::create("a", "b").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn short_projection_drops_description() {
        let ticket = Ticket::create("Printer broken", "Floor 3").unwrap();
        let short = ticket.short();

        assert_eq!(short.id, ticket.id);
        assert_eq!(short.name, ticket.name);
        assert_eq!(short.created_at, ticket.created_at);
        assert_eq!(short.status, ticket.status);

        let json = serde_json::to_value(&short).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn apply_keeps_identity() {
        let mut ticket = Ticket::create("a", "b").unwrap();
        let (id, created_at) = (ticket.id, ticket.created_at);

        ticket
            .apply(TicketPatch {
                name: Some("renamed".into()),
                status: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(ticket.id, id);
        assert_eq!(ticket.created_at, created_at);
        assert_eq!(ticket.name, "renamed");
        assert_eq!(ticket.description, "b");
        assert!(ticket.status);
    }

    #[test]
    fn rejected_patch_changes_nothing() {
        let mut ticket = Ticket::create("a", "b").unwrap();
        let original = ticket.clone();

        let err = ticket
            .apply(TicketPatch {
                name: Some("ok".into()),
                description: Some("  ".into()),
                status: Some(true),
            })
            .unwrap_err();

        assert_eq!(err, DomainError::empty_field("description"));
        assert_eq!(ticket, original);
    }

    #[test]
    fn operation_tag_rules() {
        assert!(check_operation_tag(Some("createTicket"), false).is_ok());
        assert!(check_operation_tag(Some("createTicket"), true).is_ok());
        assert!(check_operation_tag(None, false).is_ok());
        assert_eq!(
            check_operation_tag(None, true).unwrap_err(),
            DomainError::invalid_method(None)
        );
        assert_eq!(
            check_operation_tag(Some("deleteTicket"), false).unwrap_err(),
            DomainError::invalid_method(Some("deleteTicket".into()))
        );
    }

    #[test]
    fn status_text_encoding() {
        assert!(parse_status("true").unwrap());
        assert!(!parse_status(" false ").unwrap());
        for bad in ["yes", "1", "", "TRUE"] {
            let err = parse_status(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid status value");
        }
    }
}
