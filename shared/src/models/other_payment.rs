//! Day-sheet extra movement (box list)
//!
//! Money movements outside the receipt flow: manual income, expenses and
//! compensating refunds. Receipt payments add their own entries; cancelling
//! a receipt removes them again.

use serde::{Deserialize, Serialize};

/// Day-sheet movement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OtherPayment {
    pub id: i64,
    pub description: String,
    /// Negative for expenses / refunds
    pub price: f64,
    /// Movement date (`YYYY-MM-DD`)
    pub payment_date: String,
    /// Receipt that produced this movement, if any
    pub receipt_id: Option<i64>,
    pub created_at: i64,
}

/// Create movement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherPaymentCreate {
    pub description: String,
    pub price: f64,
    pub payment_date: String,
}
