//! Payment payload validation
//!
//! Turns a [`RegisterPaymentRequest`] into a normalized [`PaymentPlan`]
//! before any row is touched. A single entry without a price means "pay the
//! whole amount due"; everything else must be explicit.

use shared::models::{PaymentType, RegisterPaymentRequest};

use crate::utils::{AppError, AppResult};

/// Tolerance when comparing split-payment sums against the amount due
const AMOUNT_EPSILON: f64 = 0.01;

/// A validated set of payment rows to apply
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPlan {
    pub entries: Vec<(PaymentType, f64)>,
    pub total: f64,
    pub on_account: bool,
}

/// Validate a register-payment request against the amount due.
///
/// Rules:
/// - at least one payment entry;
/// - when `onAccount` is set, or more than one entry is present, every
///   entry must carry an explicit price;
/// - a single entry without a price settles the full amount due;
/// - a full (non on-account) split must sum to the amount due;
/// - an on-account total must be positive and below the amount due.
pub fn build_plan(req: &RegisterPaymentRequest, amount_due: f64) -> AppResult<PaymentPlan> {
    if req.payments.is_empty() {
        return Err(AppError::validation("At least one payment entry is required"));
    }

    let explicit_required = req.on_account || req.payments.len() > 1;
    let mut entries = Vec::with_capacity(req.payments.len());
    for entry in &req.payments {
        let price = match entry.price {
            Some(p) => p,
            None if explicit_required => {
                return Err(AppError::validation(
                    "Every payment entry must carry a price when paying on account or splitting",
                ));
            }
            None => amount_due,
        };
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::validation(format!(
                "Payment price must be positive, got {price}"
            )));
        }
        entries.push((entry.payment_type, price));
    }

    let total: f64 = entries.iter().map(|(_, p)| p).sum();

    if req.on_account {
        if total >= amount_due - AMOUNT_EPSILON {
            return Err(AppError::validation(format!(
                "On-account total {total} must be below the amount due {amount_due}"
            )));
        }
    } else if (total - amount_due).abs() > AMOUNT_EPSILON {
        return Err(AppError::validation(format!(
            "Payments sum to {total} but the amount due is {amount_due}"
        )));
    }

    Ok(PaymentPlan {
        entries,
        total,
        on_account: req.on_account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentEntry;

    fn entry(payment_type: PaymentType, price: Option<f64>) -> PaymentEntry {
        PaymentEntry {
            payment_type,
            price,
        }
    }

    fn request(payments: Vec<PaymentEntry>, on_account: bool) -> RegisterPaymentRequest {
        RegisterPaymentRequest {
            payments,
            on_account,
            print: false,
            barcode: None,
        }
    }

    #[test]
    fn single_entry_without_price_pays_full_amount() {
        let req = request(vec![entry(PaymentType::Cash, None)], false);
        let plan = build_plan(&req, 5000.0).unwrap();
        assert_eq!(plan.entries, vec![(PaymentType::Cash, 5000.0)]);
        assert_eq!(plan.total, 5000.0);
    }

    #[test]
    fn empty_payments_are_rejected() {
        let req = request(vec![], false);
        assert!(build_plan(&req, 5000.0).is_err());
    }

    #[test]
    fn split_requires_explicit_prices() {
        let req = request(
            vec![
                entry(PaymentType::Cash, Some(3000.0)),
                entry(PaymentType::Transfer, None),
            ],
            false,
        );
        assert!(build_plan(&req, 5000.0).is_err());
    }

    #[test]
    fn split_must_sum_to_amount_due() {
        let req = request(
            vec![
                entry(PaymentType::Cash, Some(3000.0)),
                entry(PaymentType::Transfer, Some(1000.0)),
            ],
            false,
        );
        assert!(build_plan(&req, 5000.0).is_err());

        let req = request(
            vec![
                entry(PaymentType::Cash, Some(3000.0)),
                entry(PaymentType::Transfer, Some(2000.0)),
            ],
            false,
        );
        let plan = build_plan(&req, 5000.0).unwrap();
        assert_eq!(plan.total, 5000.0);
    }

    #[test]
    fn on_account_requires_explicit_price() {
        let req = request(vec![entry(PaymentType::Cash, None)], true);
        assert!(build_plan(&req, 5000.0).is_err());
    }

    #[test]
    fn on_account_must_stay_below_amount_due() {
        let req = request(vec![entry(PaymentType::Cash, Some(5000.0))], true);
        assert!(build_plan(&req, 5000.0).is_err());

        let req = request(vec![entry(PaymentType::Cash, Some(2000.0))], true);
        let plan = build_plan(&req, 5000.0).unwrap();
        assert!(plan.on_account);
        assert_eq!(plan.total, 2000.0);
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        let req = request(vec![entry(PaymentType::Cash, Some(0.0))], false);
        assert!(build_plan(&req, 5000.0).is_err());
        let req = request(vec![entry(PaymentType::Cash, Some(-10.0))], false);
        assert!(build_plan(&req, 5000.0).is_err());
    }
}
