use async_trait::async_trait;

use crate::contract::{
    error::TicketsError,
    model::{NewTicket, ShortTicket, Ticket, TicketPatch},
};

/// Public API trait for the tickets module that other crates can use
#[async_trait]
pub trait TicketsApi: Send + Sync {
    /// List all tickets without descriptions, in creation order
    async fn list_tickets(&self) -> Result<Vec<ShortTicket>, TicketsError>;

    /// Get a full ticket by ID
    async fn get_ticket(&self, id: &str) -> Result<Ticket, TicketsError>;

    /// Create a new ticket and return the updated listing
    async fn create_ticket(&self, new_ticket: NewTicket)
        -> Result<Vec<ShortTicket>, TicketsError>;

    /// Merge a patch into a ticket; unknown ids are ignored
    async fn update_ticket(&self, id: &str, patch: TicketPatch) -> Result<(), TicketsError>;

    /// Delete a ticket by ID; unknown ids are ignored
    async fn delete_ticket(&self, id: &str) -> Result<(), TicketsError>;
}
