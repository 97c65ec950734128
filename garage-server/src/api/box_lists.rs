//! Box-list (day-sheet) API
//!
//! Lists and records the extra money movements of a day.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use shared::models::{OtherPayment, OtherPaymentCreate};

use crate::core::ServerState;
use crate::db::repository::other_payment;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/box-lists/otherPayment",
        get(list).post(create),
    )
}

#[derive(Deserialize)]
pub struct ListQuery {
    /// Movement date (`YYYY-MM-DD`); omitted means all
    pub date: Option<String>,
}

/// GET /api/box-lists/otherPayment?date=YYYY-MM-DD
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OtherPayment>>> {
    let movements = match query.date {
        Some(date) => {
            crate::utils::time::parse_date(&date)?;
            other_payment::find_by_date(&state.pool, &date).await?
        }
        None => other_payment::find_all(&state.pool).await?,
    };
    Ok(Json(movements))
}

/// POST /api/box-lists/otherPayment
///
/// Negative prices are expenses; only zero and non-finite are rejected.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OtherPaymentCreate>,
) -> AppResult<Json<OtherPayment>> {
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if !payload.price.is_finite() || payload.price == 0.0 {
        return Err(AppError::validation(format!(
            "price must be a non-zero amount, got {}",
            payload.price
        )));
    }
    crate::utils::time::parse_date(&payload.payment_date)?;
    Ok(Json(other_payment::create(&state.pool, payload).await?))
}
