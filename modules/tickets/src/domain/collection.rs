use uuid::Uuid;

use crate::contract::model::{NewTicket, ShortTicket, Ticket, TicketPatch};
use crate::domain::error::DomainError;
use crate::domain::ticket::check_operation_tag;

/// Authoritative in-memory ticket store.
///
/// Full tickets are the only stored state; the short listing is projected on
/// every read, so the two views cannot drift apart.
#[derive(Debug, Default)]
pub struct TicketCollection {
    tickets: Vec<Ticket>,
    require_operation_tag: bool,
}

impl TicketCollection {
    pub fn new(require_operation_tag: bool) -> Self {
        Self {
            tickets: Vec::new(),
            require_operation_tag,
        }
    }

    /// Start from existing tickets, keeping their order.
    pub fn with_tickets(tickets: Vec<Ticket>, require_operation_tag: bool) -> Self {
        Self {
            tickets,
            require_operation_tag,
        }
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Short tickets in insertion order.
    pub fn list(&self) -> Vec<ShortTicket> {
        self.tickets.iter().map(Ticket::short).collect()
    }

    pub fn get_full(&self, id: &str) -> Result<Ticket, DomainError> {
        let id = required_id(id)?;
        self.position(id)
            .map(|idx| self.tickets[idx].clone())
            .ok_or_else(|| DomainError::ticket_not_found(id))
    }

    pub fn create(&mut self, new_ticket: NewTicket) -> Result<Vec<ShortTicket>, DomainError> {
        check_operation_tag(new_ticket.method.as_deref(), self.require_operation_tag)?;
        let ticket = Ticket::create(&new_ticket.name, &new_ticket.description)?;
        self.tickets.push(ticket);
        Ok(self.list())
    }

    /// Returns whether a ticket matched. Unknown ids are not an error.
    pub fn update(&mut self, id: &str, patch: TicketPatch) -> Result<bool, DomainError> {
        let id = required_id(id)?;
        match self.position(id) {
            Some(idx) => {
                self.tickets[idx].apply(patch)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns whether a ticket was removed. Deleting twice is fine.
    pub fn delete(&mut self, id: &str) -> Result<bool, DomainError> {
        let id = required_id(id)?;
        match self.position(id) {
            Some(idx) => {
                self.tickets.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // Non-UUID ids never match a stored ticket.
    fn position(&self, id: &str) -> Option<usize> {
        let id = Uuid::parse_str(id).ok()?;
        self.tickets.iter().position(|t| t.id == id)
    }
}

fn required_id(id: &str) -> Result<&str, DomainError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::id_required());
    }
    Ok(id)
}
