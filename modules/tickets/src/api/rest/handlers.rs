use std::sync::Arc;

use api_ingress::AppError;
use axum::{
    extract::Path,
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
    Extension,
};
use tracing::{info, warn};

use crate::api::rest::dto::{CreateTicketReq, ShortTicketDto, UpdateTicketReq};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::JsonOrForm;
use crate::contract::model::{ShortTicket, TicketPatch};
use crate::domain::service::Service;

/// Header carrying the human-readable outcome of a successful request.
pub const STATUS_MESSAGE_HEADER: HeaderName = HeaderName::from_static("x-status-message");

fn respond(status: StatusCode, message: &'static str, body: impl IntoResponse) -> Response {
    (status, [(STATUS_MESSAGE_HEADER, message)], body).into_response()
}

fn listing(tickets: Vec<ShortTicket>) -> Json<Vec<ShortTicketDto>> {
    Json(tickets.into_iter().map(ShortTicketDto::from).collect())
}

/// List all tickets without descriptions
pub async fn list_tickets(Extension(svc): Extension<Arc<Service>>) -> Response {
    info!("Listing tickets");
    let tickets = svc.list_tickets();
    respond(StatusCode::OK, "Tickets received", listing(tickets))
}

/// Get the description of a ticket
pub async fn get_description(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    info!("Getting description for ticket {}", id);

    match svc.get_description(&id) {
        Ok(description) => Ok(respond(
            StatusCode::OK,
            "Description received",
            Json(description),
        )),
        Err(e) => {
            warn!("Failed to get ticket {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Create a ticket and return the updated listing
pub async fn create_ticket(
    Extension(svc): Extension<Arc<Service>>,
    JsonOrForm(req_body): JsonOrForm<CreateTicketReq>,
) -> Result<Response, AppError> {
    info!("Creating ticket: {:?}", req_body);

    match svc.create_ticket(req_body.into()) {
        Ok(tickets) => Ok(respond(
            StatusCode::CREATED,
            "Ticket created",
            listing(tickets),
        )),
        Err(e) => {
            warn!("Failed to create ticket: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Update an existing ticket with partial data
pub async fn update_ticket(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    JsonOrForm(req_body): JsonOrForm<UpdateTicketReq>,
) -> Result<Response, AppError> {
    info!("Updating ticket {} with: {:?}", id, req_body);

    let result = TicketPatch::try_from(req_body).and_then(|patch| svc.update_ticket(&id, patch));
    match result {
        Ok(()) => Ok(respond(StatusCode::OK, "Ticket updated", Json("Ticket updated"))),
        Err(e) => {
            warn!("Failed to update ticket {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Delete a ticket by ID
pub async fn delete_ticket(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    info!("Deleting ticket: {}", id);

    match svc.delete_ticket(&id) {
        Ok(()) => Ok(respond(StatusCode::OK, "Ticket deleted", Json("Ticket deleted"))),
        Err(e) => {
            warn!("Failed to delete ticket {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Ticket routes hit with an empty id segment (`/tickets/`)
pub async fn missing_id() -> AppError {
    AppError::bad_request("Id is required")
}
