//! Vehicle models
//!
//! Two collections exist: `Vehicle` (spots owned by OWNER customers) and
//! `VehicleRenter` (spots rented by RENTER / PRIVATE customers, which carry
//! a free-text `owner` that may be one of the manual-owner constants).

use serde::{Deserialize, Serialize};

/// Garage spot owned by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub customer_id: i64,
    pub garage_number: String,
    /// Monthly amount billed for this spot
    pub amount: f64,
    pub parking_type_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create vehicle payload (nested in customer creation)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCreate {
    pub garage_number: String,
    pub amount: f64,
    pub parking_type_id: Option<i64>,
}

/// Garage spot rented by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct VehicleRenter {
    pub id: i64,
    pub customer_id: i64,
    pub garage_number: String,
    pub amount: f64,
    /// Owner of the rented spot: either one of the manual-owner constants
    /// or free text. When the spot maps to a real `Vehicle`, the owning
    /// customer is resolved through `owner_vehicle_id`.
    pub owner: String,
    pub owner_vehicle_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create renter-spot payload (nested in customer creation)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRenterCreate {
    pub garage_number: String,
    pub amount: f64,
    pub owner: String,
    pub owner_vehicle_id: Option<i64>,
}
