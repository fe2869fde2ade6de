use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::TicketsApi,
    error::TicketsError,
    model::{NewTicket, ShortTicket, Ticket, TicketPatch},
};
use crate::domain::service::Service;

/// Local implementation of the TicketsApi trait that delegates to the domain service
pub struct TicketsLocalClient {
    service: Arc<Service>,
}

impl TicketsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TicketsApi for TicketsLocalClient {
    async fn list_tickets(&self) -> Result<Vec<ShortTicket>, TicketsError> {
        Ok(self.service.list_tickets())
    }

    async fn get_ticket(&self, id: &str) -> Result<Ticket, TicketsError> {
        self.service.get_ticket(id).map_err(Into::into)
    }

    async fn create_ticket(
        &self,
        new_ticket: NewTicket,
    ) -> Result<Vec<ShortTicket>, TicketsError> {
        self.service.create_ticket(new_ticket).map_err(Into::into)
    }

    async fn update_ticket(&self, id: &str, patch: TicketPatch) -> Result<(), TicketsError> {
        self.service.update_ticket(id, patch).map_err(Into::into)
    }

    async fn delete_ticket(&self, id: &str) -> Result<(), TicketsError> {
        self.service.delete_ticket(id).map_err(Into::into)
    }
}
