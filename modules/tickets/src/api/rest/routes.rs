use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Register the ticket endpoints on `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // GET /tickets - List tickets, POST /tickets - Create a ticket
        .route(
            "/tickets",
            get(handlers::list_tickets).post(handlers::create_ticket),
        )
        // GET/PATCH/DELETE /tickets/{id}
        .route(
            "/tickets/{id}",
            get(handlers::get_description)
                .patch(handlers::update_ticket)
                .delete(handlers::delete_ticket),
        )
        .route(
            "/tickets/",
            get(handlers::missing_id)
                .patch(handlers::missing_id)
                .delete(handlers::missing_id),
        )
        .layer(Extension(service));

    Ok(router)
}
