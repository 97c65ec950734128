//! Receipt API handlers
//!
//! The lifecycle itself lives in `receipts::service`; handlers stay thin.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use shared::models::{
    CustomerType, Receipt, ReceiptWithPayments, RegisterPaymentRequest, RegisterPaymentResponse,
};

use crate::core::ServerState;
use crate::db::repository::receipt;
use crate::receipts::service;
use crate::utils::{AppError, AppResult};

/// GET /api/receipts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Receipt>>> {
    Ok(Json(receipt::find_all(&state.pool).await?))
}

fn parse_customer_type(raw: &str) -> AppResult<CustomerType> {
    match raw.to_uppercase().as_str() {
        "OWNER" | "OWNERS" => Ok(CustomerType::Owner),
        "RENTER" | "RENTERS" => Ok(CustomerType::Renter),
        "PRIVATE" | "PRIVATES" => Ok(CustomerType::Private),
        other => Err(AppError::validation(format!(
            "Unknown customer type: {other}"
        ))),
    }
}

/// GET /api/receipts/{customerType}
///
/// Pending check: every open receipt for customers of the given type.
pub async fn pending_by_type(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> AppResult<Json<Vec<Receipt>>> {
    let ty = parse_customer_type(&raw)?;
    Ok(Json(
        receipt::find_pending_by_customer_type(&state.pool, ty).await?,
    ))
}

/// PATCH /api/receipts/{receiptId}/customers/{customerId}
pub async fn register(
    State(state): State<ServerState>,
    Path((receipt_id, customer_id)): Path<(i64, i64)>,
    Json(payload): Json<RegisterPaymentRequest>,
) -> AppResult<Json<RegisterPaymentResponse>> {
    let res =
        service::register_payment(&state.pool, customer_id, Some(receipt_id), &payload).await?;
    Ok(Json(res))
}

/// PATCH /api/receipts/customers/{customerId}
///
/// Targets the customer's current pending receipt.
pub async fn register_on_pending(
    State(state): State<ServerState>,
    Path(customer_id): Path<i64>,
    Json(payload): Json<RegisterPaymentRequest>,
) -> AppResult<Json<RegisterPaymentResponse>> {
    let res = service::register_payment(&state.pool, customer_id, None, &payload).await?;
    Ok(Json(res))
}

/// PATCH /api/receipts/cancelReceipt/{receiptId}/customers/{customerId}
pub async fn cancel(
    State(state): State<ServerState>,
    Path((receipt_id, customer_id)): Path<(i64, i64)>,
) -> AppResult<Json<ReceiptWithPayments>> {
    Ok(Json(
        service::cancel_receipt(&state.pool, receipt_id, customer_id).await?,
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub confirmation: String,
}

/// DELETE /api/receipts/{id}
pub async fn delete_receipt(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<DeleteConfirmation>,
) -> AppResult<Json<()>> {
    service::delete_receipt(&state.pool, id, &body.confirmation).await?;
    Ok(Json(()))
}

/// GET /api/receipts/customers/{id}/print
///
/// Renders the two-copy receipt PDF for the customer's pending cycle.
pub async fn print(
    State(state): State<ServerState>,
    Path(customer_id): Path<i64>,
) -> AppResult<Response> {
    let (bytes, filename) = service::print_receipt(&state.pool, customer_id).await?;
    let disposition = format!("attachment; filename=\"{filename}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
