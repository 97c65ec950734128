//! Receipt document model
//!
//! The server builds a [`ReceiptDoc`] from a customer and their pending
//! receipt; this crate only lays it out and draws it.

use serde::{Deserialize, Serialize};

/// Which fixed template the receipt uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptTemplate {
    /// OWNER customers: building expenses
    Expenses,
    /// RENTER / PRIVATE customers: spot rental
    Rental,
}

impl ReceiptTemplate {
    /// Title printed in the template header
    pub fn title(&self) -> &'static str {
        match self {
            ReceiptTemplate::Expenses => "RECIBO DE EXPENSAS",
            ReceiptTemplate::Rental => "RECIBO DE ALQUILER",
        }
    }
}

/// One line item: a garage spot
///
/// The `unit_amount` is the spot's own amount; the per-line total column is
/// NOT a per-vehicle subtotal, it repeats the overall document total on
/// every line (observed behavior of the paper receipts, kept as-is).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub quantity: u32,
    pub description: String,
    pub unit_amount: f64,
}

/// A complete receipt document, ready to lay out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptDoc {
    pub template: ReceiptTemplate,
    /// Assigned on payment; pending receipts print without one
    pub receipt_number: Option<i64>,
    pub customer_name: String,
    pub address: String,
    /// Payment-type label, e.g. "Transferencia" / "Efectivo"
    pub payment_label: String,
    /// Print date (`YYYY-MM-DD`)
    pub date: String,
    pub items: Vec<ReceiptLine>,
    /// Overall amount due
    pub total: f64,
}

/// Format a monetary amount the way the paper receipt shows it:
/// `$5000` for whole amounts, `$5000.50` otherwise.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${}", amount as i64)
    } else {
        format!("${:.2}", amount)
    }
}
