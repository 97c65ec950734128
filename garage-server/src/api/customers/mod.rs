//! Customer API module
//!
//! Also hosts the interest-setting and parking-type routes the console
//! reaches through the customers prefix.

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/customer/{type}", get(handler::list_by_type))
        .route("/interestSetting", get(handler::get_interest).post(handler::upsert_interest))
        .route(
            "/parking/parkingTypes",
            get(handler::list_parking_types).post(handler::create_parking_type),
        )
        .route(
            "/parking/parkingTypes/{id}",
            patch(handler::update_parking_type).delete(handler::delete_parking_type),
        )
        .route("/softDelete/{id}", delete(handler::soft_delete))
        .route("/restoredCustomer/{id}", patch(handler::restore))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::hard_delete),
        )
}
