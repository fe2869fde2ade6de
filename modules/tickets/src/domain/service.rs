use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewTicket, ShortTicket, Ticket, TicketPatch};
use crate::domain::collection::TicketCollection;
use crate::domain::error::DomainError;

/// Domain service for ticket management.
/// Serializes every operation through one lock around the collection.
pub struct Service {
    tickets: Mutex<TicketCollection>,
}

/// Configuration for the domain service
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub require_operation_tag: bool,
}

impl Service {
    /// Create a service with an empty collection.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_tickets(Vec::new(), config)
    }

    /// Create a service pre-populated with `seed`.
    pub fn with_tickets(seed: Vec<Ticket>, config: ServiceConfig) -> Self {
        let collection = TicketCollection::with_tickets(seed, config.require_operation_tag);
        Self {
            tickets: Mutex::new(collection),
        }
    }

    pub fn len(&self) -> usize {
        self.tickets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.lock().is_empty()
    }

    #[instrument(name = "tickets.service.list_tickets", skip(self))]
    pub fn list_tickets(&self) -> Vec<ShortTicket> {
        let list = self.tickets.lock().list();
        debug!("Listed {} tickets", list.len());
        list
    }

    #[instrument(name = "tickets.service.get_ticket", skip(self), fields(ticket_id = %id))]
    pub fn get_ticket(&self, id: &str) -> Result<Ticket, DomainError> {
        debug!("Getting ticket by id");
        self.tickets.lock().get_full(id)
    }

    #[instrument(name = "tickets.service.get_description", skip(self), fields(ticket_id = %id))]
    pub fn get_description(&self, id: &str) -> Result<String, DomainError> {
        debug!("Getting ticket description");
        self.tickets.lock().get_full(id).map(|t| t.description)
    }

    #[instrument(
        name = "tickets.service.create_ticket",
        skip(self, new_ticket),
        fields(name = %new_ticket.name)
    )]
    pub fn create_ticket(&self, new_ticket: NewTicket) -> Result<Vec<ShortTicket>, DomainError> {
        info!("Creating new ticket");
        let list = self.tickets.lock().create(new_ticket)?;
        info!(total = list.len(), "Ticket created");
        Ok(list)
    }

    #[instrument(name = "tickets.service.update_ticket", skip(self), fields(ticket_id = %id))]
    pub fn update_ticket(&self, id: &str, patch: TicketPatch) -> Result<(), DomainError> {
        info!("Updating ticket");
        if self.tickets.lock().update(id, patch)? {
            debug!("Ticket updated");
        } else {
            debug!("No ticket matched, nothing to update");
        }
        Ok(())
    }

    #[instrument(name = "tickets.service.delete_ticket", skip(self), fields(ticket_id = %id))]
    pub fn delete_ticket(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting ticket");
        if self.tickets.lock().delete(id)? {
            debug!("Ticket deleted");
        } else {
            debug!("No ticket matched, nothing to delete");
        }
        Ok(())
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
