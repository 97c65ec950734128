//! REST API
//!
//! One module per resource, each exposing a `router()`. The wire contract
//! (paths, camelCase payloads, `{ code, message }` errors) matches what the
//! admin console already speaks.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod box_lists;
pub mod customers;
pub mod exports;
pub mod health;
pub mod notes;
pub mod receipts;
pub mod scanner;
pub mod tickets;
pub mod users;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(customers::router())
        .merge(receipts::router())
        .merge(scanner::router())
        .merge(tickets::router())
        .merge(users::router())
        .merge(box_lists::router())
        .merge(notes::router())
        .merge(exports::router())
        .merge(health::router())
}

/// Build the application with middleware layered on
///
/// The console runs on a different origin during development, hence the
/// permissive CORS.
pub fn build_app(_state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
