//! Ticket models
//!
//! Transient parking billed by barcode scan, unrelated to the
//! customer/receipt flow. `Ticket` is the hourly price catalog entry;
//! `TicketRegistration` records an actual scan; day/week stays are tracked
//! separately as `TicketRegistrationForDay`.

use serde::{Deserialize, Serialize};

/// Hourly ticket price entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    /// Barcode printed on the ticket
    pub code_bar: String,
    pub vehicle_type: String,
    /// Price band, e.g. "DAY" / "NIGHT"
    pub ticket_time_price: String,
    pub price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / update ticket payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreate {
    pub code_bar: String,
    pub vehicle_type: String,
    pub ticket_time_price: String,
    pub price: f64,
}

/// A scanned ticket registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TicketRegistration {
    pub id: i64,
    pub ticket_id: i64,
    pub description: String,
    pub price: f64,
    pub entry_time: i64,
    pub created_at: i64,
}

/// Day / week parking registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TicketRegistrationForDay {
    pub id: i64,
    pub description: String,
    pub price: f64,
    pub weeks: i64,
    /// Stay start (`YYYY-MM-DD`)
    pub start_date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create day / week registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRegistrationForDayCreate {
    pub description: String,
    pub price: f64,
    pub weeks: i64,
    pub start_date: String,
}
