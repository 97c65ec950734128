//! Customer model

use serde::{Deserialize, Serialize};

use super::receipt::ReceiptWithPayments;
use super::vehicle::{Vehicle, VehicleCreate, VehicleRenter, VehicleRenterCreate};

/// Customer category. Determines which vehicle collection is populated
/// and which billing template applies when printing a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerType {
    /// Garage owner billed for expenses
    Owner,
    /// Renter of a garage spot
    Renter,
    /// Third-party tenant renting through a manual owner
    Private,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Owner => "OWNER",
            CustomerType::Renter => "RENTER",
            CustomerType::Private => "PRIVATE",
        }
    }

    /// RENTER and PRIVATE customers rent spots; OWNER customers own them.
    pub fn uses_renter_collection(&self) -> bool {
        matches!(self, CustomerType::Renter | CustomerType::Private)
    }
}

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub document_number: Option<String>,
    pub customer_type: CustomerType,
    pub number_of_vehicles: i64,
    /// Soft-delete marker (unix millis); soft-deleted customers stay in
    /// listings, muted and sorted last.
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customer with its vehicle collections and receipts (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerWithDetail {
    #[serde(flatten)]
    pub customer: Customer,
    /// Populated for OWNER customers
    pub vehicles: Vec<Vehicle>,
    /// Populated for RENTER / PRIVATE customers
    pub vehicle_renters: Vec<VehicleRenter>,
    pub receipts: Vec<ReceiptWithPayments>,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub document_number: Option<String>,
    pub customer_type: CustomerType,
    #[serde(default)]
    pub vehicles: Vec<VehicleCreate>,
    #[serde(default)]
    pub vehicle_renters: Vec<VehicleRenterCreate>,
}

/// Update customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub document_number: Option<String>,
}
