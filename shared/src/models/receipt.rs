//! Receipt models
//!
//! A customer has at most one PENDING receipt at a time (the current unpaid
//! billing cycle). Paying it turns it PAID and the server issues the next
//! PENDING receipt. Status is an explicit tagged enum with guarded
//! transitions; nothing is inferred from the presence of payment fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Receipt lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum ReceiptStatus {
    Pending,
    Paid,
}

/// Rejected receipt status transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptTransitionError {
    #[error("receipt is already paid")]
    AlreadyPaid,
    #[error("receipt is not paid, nothing to cancel")]
    NotPaid,
}

impl ReceiptStatus {
    /// PENDING → PAID (register payment)
    pub fn pay(self) -> Result<Self, ReceiptTransitionError> {
        match self {
            ReceiptStatus::Pending => Ok(ReceiptStatus::Paid),
            ReceiptStatus::Paid => Err(ReceiptTransitionError::AlreadyPaid),
        }
    }

    /// PAID → PENDING (cancel payment)
    pub fn cancel(self) -> Result<Self, ReceiptTransitionError> {
        match self {
            ReceiptStatus::Paid => Ok(ReceiptStatus::Pending),
            ReceiptStatus::Pending => Err(ReceiptTransitionError::NotPaid),
        }
    }
}

/// How a receipt (or part of it) was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    Transfer,
    Cash,
    Check,
    Credit,
}

impl PaymentType {
    /// Label printed on receipts (Spanish)
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Transfer => "Transferencia",
            PaymentType::Cash => "Efectivo",
            PaymentType::Check => "Cheque",
            PaymentType::Credit => "Crédito",
        }
    }
}

/// Receipt entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: i64,
    pub customer_id: i64,
    pub status: ReceiptStatus,
    /// Amount currently due
    pub price: f64,
    /// Amount the billing cycle opened with (before on-account payments)
    pub start_amount: f64,
    /// Billing cycle start date (`YYYY-MM-DD`)
    pub start_date: String,
    pub payment_date: Option<String>,
    pub payment_type: Option<PaymentType>,
    /// Sequential number assigned when the receipt is paid
    pub receipt_number: Option<i64>,
    /// Barcode used by the scanner intake
    pub barcode: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A single split-payment row of a paid receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayment {
    pub id: i64,
    pub receipt_id: i64,
    pub payment_type: PaymentType,
    pub price: f64,
    pub created_at: i64,
}

/// A partial (on-account) payment applied without settling the receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OnAccountPayment {
    pub id: i64,
    pub receipt_id: i64,
    pub payment_type: PaymentType,
    pub price: f64,
    pub payment_date: String,
    pub created_at: i64,
}

/// Receipt with its payment rows (detail / listing view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptWithPayments {
    #[serde(flatten)]
    pub receipt: Receipt,
    pub payments: Vec<ReceiptPayment>,
    pub payment_history_on_account: Vec<OnAccountPayment>,
}

/// One entry of a register-payment request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub payment_type: PaymentType,
    /// Required when paying on account or when splitting across entries
    pub price: Option<f64>,
}

/// Register-payment request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentRequest {
    pub payments: Vec<PaymentEntry>,
    #[serde(default)]
    pub on_account: bool,
    #[serde(default)]
    pub print: bool,
    pub barcode: Option<String>,
}

/// Register-payment response: the console surfaces the assigned number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentResponse {
    pub receipt_id: i64,
    pub status: ReceiptStatus,
    pub receipt_number: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_pays_to_paid() {
        assert_eq!(ReceiptStatus::Pending.pay(), Ok(ReceiptStatus::Paid));
    }

    #[test]
    fn paid_cannot_be_paid_again() {
        assert_eq!(
            ReceiptStatus::Paid.pay(),
            Err(ReceiptTransitionError::AlreadyPaid)
        );
    }

    #[test]
    fn paid_cancels_back_to_pending() {
        assert_eq!(ReceiptStatus::Paid.cancel(), Ok(ReceiptStatus::Pending));
    }

    #[test]
    fn pending_has_nothing_to_cancel() {
        assert_eq!(
            ReceiptStatus::Pending.cancel(),
            Err(ReceiptTransitionError::NotPaid)
        );
    }

    #[test]
    fn payment_type_labels_are_spanish() {
        assert_eq!(PaymentType::Transfer.label(), "Transferencia");
        assert_eq!(PaymentType::Cash.label(), "Efectivo");
    }

    #[test]
    fn register_payment_request_accepts_camel_case() {
        let json = r#"{"payments":[{"paymentType":"CASH"}],"onAccount":false,"print":true}"#;
        let req: RegisterPaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.payments.len(), 1);
        assert_eq!(req.payments[0].payment_type, PaymentType::Cash);
        assert!(req.payments[0].price.is_none());
        assert!(!req.on_account);
        assert!(req.print);
    }
}
