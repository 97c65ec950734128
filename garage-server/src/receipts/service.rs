//! Receipt lifecycle service
//!
//! Owns the transactions behind register-payment, cancel and delete, plus
//! the initial-cycle issue on customer creation and the print endpoint's
//! document assembly. Every mutation either commits whole or not at all.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{info, warn};

use garage_printer::ReceiptPdfRenderer;
use shared::models::{
    Customer, PaymentType, Receipt, ReceiptWithPayments, RegisterPaymentRequest,
    RegisterPaymentResponse,
};

use crate::db::repository::{customer, other_payment, parking_type, receipt};
use crate::receipts::doc::build_receipt_doc;
use crate::receipts::payment::build_plan;
use crate::utils::validation::{RECEIPT_DELETE_PHRASE, require_confirmation};
use crate::utils::{AppError, AppResult, time};

/// Monthly amount of a customer's governing vehicle collection
async fn cycle_amount(pool: &SqlitePool, target: &Customer) -> AppResult<f64> {
    let amount = if target.customer_type.uses_renter_collection() {
        customer::renters_by_customer(pool, target.id)
            .await?
            .iter()
            .map(|r| r.amount)
            .sum()
    } else {
        customer::vehicles_by_customer(pool, target.id)
            .await?
            .iter()
            .map(|v| v.amount)
            .sum()
    };
    Ok(amount)
}

/// First day of the current month, `YYYY-MM-DD`
fn current_cycle_start() -> String {
    let today = shared::util::today_string();
    format!("{}-01", &today[..7])
}

async fn require_customer(pool: &SqlitePool, id: i64) -> AppResult<Customer> {
    customer::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
}

async fn require_receipt(pool: &SqlitePool, id: i64, customer_id: i64) -> AppResult<Receipt> {
    let target = receipt::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Receipt {id} not found")))?;
    if target.customer_id != customer_id {
        return Err(AppError::not_found(format!(
            "Receipt {id} does not belong to customer {customer_id}"
        )));
    }
    Ok(target)
}

/// Open the first billing cycle for a freshly created customer.
pub async fn issue_initial_pending(pool: &SqlitePool, customer_id: i64) -> AppResult<Receipt> {
    let target = require_customer(pool, customer_id).await?;
    let amount = cycle_amount(pool, &target).await?;
    let start = current_cycle_start();

    let mut tx = pool.begin().await.map_err(db_err)?;
    let id = receipt::insert_pending(&mut tx, customer_id, amount, &start).await?;
    tx.commit().await.map_err(db_err)?;

    receipt::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Failed to issue initial receipt"))
}

/// Register a payment on a receipt.
///
/// `receipt_id = None` targets the customer's current PENDING receipt. A
/// full payment settles the receipt, assigns the next receipt number and
/// opens next month's cycle; an on-account payment appends history and
/// reduces the amount due, leaving the receipt PENDING.
pub async fn register_payment(
    pool: &SqlitePool,
    customer_id: i64,
    receipt_id: Option<i64>,
    req: &RegisterPaymentRequest,
) -> AppResult<RegisterPaymentResponse> {
    let target = require_customer(pool, customer_id).await?;
    let current = match (receipt_id, &req.barcode) {
        (Some(id), _) => require_receipt(pool, id, customer_id).await?,
        // Scanner-driven payments carry the scanned barcode instead of an id.
        (None, Some(barcode)) => {
            let found = receipt::find_by_barcode(pool, barcode)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Unknown barcode: {barcode}")))?;
            require_receipt(pool, found.id, customer_id).await?
        }
        (None, None) => receipt::find_pending_by_customer(pool, customer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Customer {customer_id} has no pending receipt"))
            })?,
    };

    // Guarded transition: rejects a second payment on a settled receipt.
    let paid_status = current.status.pay()?;

    let plan = build_plan(req, current.price)?;
    let today = shared::util::today_string();
    let next_amount = cycle_amount(pool, &target).await?;

    let mut tx = pool.begin().await.map_err(db_err)?;

    if plan.on_account {
        for (payment_type, price) in &plan.entries {
            receipt::insert_on_account(&mut tx, current.id, *payment_type, *price, &today).await?;
        }
        receipt::set_price(&mut tx, current.id, current.price - plan.total).await?;
        other_payment::insert_movement(
            &mut tx,
            &format!("Entrega a cuenta {}", target.full_name()),
            plan.total,
            &today,
        )
        .await?;
        tx.commit().await.map_err(db_err)?;

        info!(
            receipt_id = current.id,
            amount = plan.total,
            "On-account payment registered"
        );
        return Ok(RegisterPaymentResponse {
            receipt_id: current.id,
            status: current.status,
            receipt_number: None,
        });
    }

    let number = receipt::next_receipt_number(&mut tx).await?;
    for (payment_type, price) in &plan.entries {
        receipt::insert_payment(&mut tx, current.id, *payment_type, *price).await?;
    }
    receipt::mark_paid(&mut tx, current.id, &today, plan.entries[0].0, number).await?;
    other_payment::insert_for_receipt(
        &mut tx,
        current.id,
        &format!("Recibo N° {number} {}", target.full_name()),
        plan.total,
        &today,
    )
    .await?;

    // Open next month's cycle. The partial unique index guarantees this is
    // the only PENDING receipt the customer ends up with.
    let next_start = time::next_cycle_start(&current.start_date)?;
    receipt::insert_pending(&mut tx, customer_id, next_amount, &next_start).await?;

    tx.commit().await.map_err(db_err)?;

    info!(
        receipt_id = current.id,
        receipt_number = number,
        "Payment registered"
    );
    Ok(RegisterPaymentResponse {
        receipt_id: current.id,
        status: paid_status,
        receipt_number: Some(number),
    })
}

/// Cancel a paid receipt: PAID → PENDING.
///
/// Payment rows and the settlement day-sheet movement are removed, the
/// amount due is restored (minus on-account history, which survives), the
/// auto-issued next cycle is withdrawn, and CREDIT settlements get a
/// compensating negative movement. Only the customer's most recently
/// settled receipt can be cancelled; older months stay closed.
pub async fn cancel_receipt(
    pool: &SqlitePool,
    receipt_id: i64,
    customer_id: i64,
) -> AppResult<ReceiptWithPayments> {
    let target = require_customer(pool, customer_id).await?;
    let current = require_receipt(pool, receipt_id, customer_id).await?;
    current.status.cancel()?;

    // Only the most recently settled cycle can be cancelled. Reverting an
    // older receipt would withdraw a pending cycle a later payment opened,
    // and re-paying it would issue a second receipt for that later month.
    let latest = receipt::find_latest_paid_by_customer(pool, customer_id).await?;
    if latest.map(|r| r.id) != Some(receipt_id) {
        return Err(AppError::business_rule(format!(
            "Receipt {receipt_id} is not the customer's most recently settled receipt"
        )));
    }

    let on_account = receipt::sum_on_account(pool, receipt_id).await?;
    let paid_amount = current.start_amount - on_account;

    // The next cycle only exists because this receipt was paid; it can be
    // withdrawn as long as nothing was paid against it.
    let next = receipt::find_pending_by_customer(pool, customer_id).await?;
    if let Some(next) = &next
        && receipt::has_activity(pool, next.id).await?
    {
        return Err(AppError::business_rule(format!(
            "Receipt {receipt_id} cannot be cancelled: the next cycle already has payments"
        )));
    }

    let today = shared::util::today_string();
    let mut tx = pool.begin().await.map_err(db_err)?;

    if let Some(next) = &next {
        receipt::delete_in_tx(&mut tx, next.id).await?;
    }
    receipt::revert_to_pending(&mut tx, receipt_id, paid_amount).await?;
    receipt::delete_payments(&mut tx, receipt_id).await?;
    other_payment::delete_for_receipt(&mut tx, receipt_id).await?;

    if current.payment_type == Some(PaymentType::Credit)
        && let Some(number) = current.receipt_number
    {
        other_payment::insert_movement(
            &mut tx,
            &format!("Devolución Recibo N° {number} {}", target.full_name()),
            -paid_amount,
            &today,
        )
        .await?;
    }

    tx.commit().await.map_err(db_err)?;

    info!(receipt_id, "Receipt payment cancelled");
    let reverted = receipt::find_by_id(pool, receipt_id)
        .await?
        .ok_or_else(|| AppError::database("Receipt vanished during cancel"))?;
    Ok(receipt::with_payments(pool, reverted).await?)
}

/// Delete a receipt after checking the typed confirmation phrase.
///
/// The phrase check runs before any database access; a mismatch leaves
/// everything untouched.
pub async fn delete_receipt(pool: &SqlitePool, receipt_id: i64, phrase: &str) -> AppResult<()> {
    require_confirmation(phrase, RECEIPT_DELETE_PHRASE)?;
    if !receipt::delete(pool, receipt_id).await? {
        return Err(AppError::not_found(format!("Receipt {receipt_id} not found")));
    }
    info!(receipt_id, "Receipt deleted");
    Ok(())
}

/// Render the two-copy receipt PDF for a customer's pending receipt.
///
/// Returns the PDF bytes and the download filename.
pub async fn print_receipt(pool: &SqlitePool, customer_id: i64) -> AppResult<(Vec<u8>, String)> {
    let target = require_customer(pool, customer_id).await?;
    let vehicles = customer::vehicles_by_customer(pool, customer_id).await?;
    let renters = customer::renters_by_customer(pool, customer_id).await?;
    let parking_tags: HashMap<i64, String> = parking_type::find_all(pool)
        .await?
        .into_iter()
        .map(|p| (p.id, p.parking_type))
        .collect();

    let pending = receipt::find_pending_by_customer(pool, customer_id).await?;
    if pending.is_none() {
        warn!(customer_id, "Printing receipt without a pending cycle, amount defaults to 0");
    }

    let doc = build_receipt_doc(&target, &vehicles, &renters, &parking_tags, pending.as_ref());
    let bytes = ReceiptPdfRenderer::new().render(&doc)?;
    let filename = format!("Recibo-{}-{}.pdf", target.first_name, target.last_name);
    Ok((bytes, filename))
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{
        CustomerCreate, CustomerType, PaymentEntry, ReceiptStatus, VehicleCreate,
    };

    async fn seed_owner(pool: &SqlitePool) -> Customer {
        customer::create(
            pool,
            CustomerCreate {
                first_name: "Laura".into(),
                last_name: "Gimenez".into(),
                address: "Mitre 540".into(),
                document_number: Some("30123456".into()),
                customer_type: CustomerType::Owner,
                vehicles: vec![
                    VehicleCreate {
                        garage_number: "12".into(),
                        amount: 3000.0,
                        parking_type_id: None,
                    },
                    VehicleCreate {
                        garage_number: "13".into(),
                        amount: 2000.0,
                        parking_type_id: None,
                    },
                ],
                vehicle_renters: vec![],
            },
        )
        .await
        .unwrap()
    }

    fn full_cash() -> RegisterPaymentRequest {
        RegisterPaymentRequest {
            payments: vec![PaymentEntry {
                payment_type: PaymentType::Cash,
                price: None,
            }],
            on_account: false,
            print: false,
            barcode: None,
        }
    }

    #[tokio::test]
    async fn initial_cycle_sums_vehicle_amounts() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();
        assert_eq!(pending.status, ReceiptStatus::Pending);
        assert_eq!(pending.price, 5000.0);
        assert_eq!(pending.start_amount, 5000.0);
    }

    #[tokio::test]
    async fn paying_settles_and_opens_the_next_cycle() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let res = register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();
        assert_eq!(res.status, ReceiptStatus::Paid);
        assert_eq!(res.receipt_number, Some(1));

        let paid = receipt::find_by_id(&db.pool, pending.id).await.unwrap().unwrap();
        assert_eq!(paid.status, ReceiptStatus::Paid);
        assert_eq!(paid.payment_type, Some(PaymentType::Cash));

        let next = receipt::find_pending_by_customer(&db.pool, owner.id)
            .await
            .unwrap()
            .expect("next cycle issued");
        assert_ne!(next.id, pending.id);
        assert_eq!(next.price, 5000.0);
        assert_eq!(next.start_date, time::next_cycle_start(&pending.start_date).unwrap());
    }

    #[tokio::test]
    async fn receipt_numbers_are_monotonic() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let first = register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();
        let second = register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();
        assert_eq!(first.receipt_number, Some(1));
        assert_eq!(second.receipt_number, Some(2));
    }

    #[tokio::test]
    async fn scanned_barcode_targets_the_receipt() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let mut req = full_cash();
        req.barcode = Some(pending.barcode.clone());
        let res = register_payment(&db.pool, owner.id, None, &req).await.unwrap();
        assert_eq!(res.receipt_id, pending.id);
        assert_eq!(res.status, ReceiptStatus::Paid);
    }

    #[tokio::test]
    async fn paying_a_paid_receipt_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();
        register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();

        let err = register_payment(&db.pool, owner.id, Some(pending.id), &full_cash())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn on_account_reduces_price_and_stays_pending() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let req = RegisterPaymentRequest {
            payments: vec![PaymentEntry {
                payment_type: PaymentType::Transfer,
                price: Some(2000.0),
            }],
            on_account: true,
            print: false,
            barcode: None,
        };
        let res = register_payment(&db.pool, owner.id, None, &req).await.unwrap();
        assert_eq!(res.status, ReceiptStatus::Pending);
        assert!(res.receipt_number.is_none());

        let after = receipt::find_by_id(&db.pool, pending.id).await.unwrap().unwrap();
        assert_eq!(after.status, ReceiptStatus::Pending);
        assert_eq!(after.price, 3000.0);
        assert_eq!(after.start_amount, 5000.0);

        let history = receipt::on_account_by_receipt(&db.pool, pending.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].price, 2000.0);
    }

    #[tokio::test]
    async fn cancel_reverts_and_withdraws_the_next_cycle() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();
        register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();

        let reverted = cancel_receipt(&db.pool, pending.id, owner.id).await.unwrap();
        assert_eq!(reverted.receipt.status, ReceiptStatus::Pending);
        assert_eq!(reverted.receipt.price, 5000.0);
        assert!(reverted.receipt.receipt_number.is_none());
        assert!(reverted.payments.is_empty());

        // The auto-issued next cycle is gone; this receipt is the only
        // pending one again.
        let current = receipt::find_pending_by_customer(&db.pool, owner.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, pending.id);
    }

    #[tokio::test]
    async fn cancelling_an_older_paid_receipt_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let first = issue_initial_pending(&db.pool, owner.id).await.unwrap();
        register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();
        let second = receipt::find_pending_by_customer(&db.pool, owner.id)
            .await
            .unwrap()
            .unwrap();
        register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();

        // Reverting the first month would withdraw the cycle the second
        // month's payment opened and later double-issue that cycle.
        let err = cancel_receipt(&db.pool, first.id, owner.id).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        // The latest settled receipt can still be cancelled, and its own
        // next cycle is the one withdrawn.
        cancel_receipt(&db.pool, second.id, owner.id).await.unwrap();
        let current = receipt::find_pending_by_customer(&db.pool, owner.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.id, second.id);
    }

    #[tokio::test]
    async fn cancel_keeps_on_account_history() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let partial = RegisterPaymentRequest {
            payments: vec![PaymentEntry {
                payment_type: PaymentType::Cash,
                price: Some(2000.0),
            }],
            on_account: true,
            print: false,
            barcode: None,
        };
        register_payment(&db.pool, owner.id, None, &partial)
            .await
            .unwrap();
        register_payment(&db.pool, owner.id, None, &full_cash())
            .await
            .unwrap();

        let reverted = cancel_receipt(&db.pool, pending.id, owner.id).await.unwrap();
        // Amount due excludes the surviving on-account payment.
        assert_eq!(reverted.receipt.price, 3000.0);
        assert_eq!(reverted.payment_history_on_account.len(), 1);
    }

    #[tokio::test]
    async fn cancel_of_a_pending_receipt_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let err = cancel_receipt(&db.pool, pending.id, owner.id).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn delete_requires_the_exact_phrase() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let err = delete_receipt(&db.pool, pending.id, "eliminar recibo")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(receipt::find_by_id(&db.pool, pending.id).await.unwrap().is_some());

        delete_receipt(&db.pool, pending.id, RECEIPT_DELETE_PHRASE)
            .await
            .unwrap();
        assert!(receipt::find_by_id(&db.pool, pending.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn print_produces_a_pdf_and_a_filename() {
        let db = DbService::in_memory().await.unwrap();
        let owner = seed_owner(&db.pool).await;
        issue_initial_pending(&db.pool, owner.id).await.unwrap();

        let (bytes, filename) = print_receipt(&db.pool, owner.id).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(filename, "Recibo-Laura-Gimenez.pdf");
    }
}
