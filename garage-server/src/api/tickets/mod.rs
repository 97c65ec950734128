//! Ticket API module
//!
//! Hourly ticket price entries plus the two registration listings.

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/registrations", get(handler::list_registrations))
        .route(
            "/registrationForDays",
            get(handler::list_day_registrations).post(handler::create_day_registration),
        )
        .route(
            "/registrationForDays/{id}",
            delete(handler::delete_day_registration),
        )
        .route(
            "/{id}",
            axum::routing::patch(handler::update).delete(handler::delete_ticket),
        )
}
