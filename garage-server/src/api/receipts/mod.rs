//! Receipt API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/receipts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // GET takes a customer type, DELETE a receipt id; one pattern,
        // two meanings, inherited from the console's routes.
        .route(
            "/{id}",
            get(handler::pending_by_type).delete(handler::delete_receipt),
        )
        .route("/customers/{customerId}", patch(handler::register_on_pending))
        .route("/customers/{customerId}/print", get(handler::print))
        // First segment must reuse the `{id}` name or the router rejects
        // the overlapping patterns.
        .route("/{id}/customers/{customerId}", patch(handler::register))
        .route(
            "/cancelReceipt/{receiptId}/customers/{customerId}",
            patch(handler::cancel),
        )
}
