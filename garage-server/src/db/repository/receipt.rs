//! Receipt Repository
//!
//! Row-level primitives only; the lifecycle (guarded transitions, issuing
//! the next cycle, day-sheet bookkeeping) lives in `receipts::service`,
//! which owns the transaction and calls the `tx`-taking functions here.

use super::{RepoError, RepoResult};
use shared::models::{
    OnAccountPayment, PaymentType, Receipt, ReceiptPayment, ReceiptWithPayments,
};
use sqlx::{SqlitePool, Transaction};

type SqliteTx<'a> = Transaction<'a, sqlx::Sqlite>;

const RECEIPT_SELECT: &str = "SELECT id, customer_id, status, price, start_amount, start_date, payment_date, payment_type, receipt_number, barcode, created_at, updated_at FROM receipt";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Receipt>> {
    let sql = format!("{RECEIPT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Receipt>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_barcode(pool: &SqlitePool, barcode: &str) -> RepoResult<Option<Receipt>> {
    let sql = format!("{RECEIPT_SELECT} WHERE barcode = ?");
    let row = sqlx::query_as::<_, Receipt>(&sql)
        .bind(barcode)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_pending_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Option<Receipt>> {
    let sql = format!("{RECEIPT_SELECT} WHERE customer_id = ? AND status = 'PENDING'");
    let row = sqlx::query_as::<_, Receipt>(&sql)
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Most recently settled receipt of a customer, by cycle start
pub async fn find_latest_paid_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Option<Receipt>> {
    let sql = format!(
        "{RECEIPT_SELECT} WHERE customer_id = ? AND status = 'PAID' ORDER BY start_date DESC LIMIT 1"
    );
    let row = sqlx::query_as::<_, Receipt>(&sql)
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Receipt>> {
    let sql = format!("{RECEIPT_SELECT} ORDER BY start_date DESC");
    let rows = sqlx::query_as::<_, Receipt>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Pending receipts for every customer of the given type (pending check)
pub async fn find_pending_by_customer_type(
    pool: &SqlitePool,
    customer_type: shared::models::CustomerType,
) -> RepoResult<Vec<Receipt>> {
    let sql = format!(
        "{RECEIPT_SELECT} WHERE status = 'PENDING' AND customer_id IN (SELECT id FROM customer WHERE customer_type = ?) ORDER BY start_date"
    );
    let rows = sqlx::query_as::<_, Receipt>(&sql)
        .bind(customer_type)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Receipts whose billing cycle starts in the given month (`YYYY-MM`)
pub async fn find_by_month(pool: &SqlitePool, year: i32, month: u32) -> RepoResult<Vec<Receipt>> {
    let prefix = format!("{year:04}-{month:02}-%");
    let sql = format!("{RECEIPT_SELECT} WHERE start_date LIKE ? ORDER BY start_date");
    let rows = sqlx::query_as::<_, Receipt>(&sql)
        .bind(prefix)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn payments_by_receipt(
    pool: &SqlitePool,
    receipt_id: i64,
) -> RepoResult<Vec<ReceiptPayment>> {
    let rows = sqlx::query_as::<_, ReceiptPayment>(
        "SELECT id, receipt_id, payment_type, price, created_at FROM receipt_payment WHERE receipt_id = ? ORDER BY created_at",
    )
    .bind(receipt_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn on_account_by_receipt(
    pool: &SqlitePool,
    receipt_id: i64,
) -> RepoResult<Vec<OnAccountPayment>> {
    let rows = sqlx::query_as::<_, OnAccountPayment>(
        "SELECT id, receipt_id, payment_type, price, payment_date, created_at FROM on_account_payment WHERE receipt_id = ? ORDER BY created_at",
    )
    .bind(receipt_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Receipts of a customer with their payment rows, newest cycle first
pub async fn find_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<ReceiptWithPayments>> {
    let sql = format!("{RECEIPT_SELECT} WHERE customer_id = ? ORDER BY start_date DESC");
    let receipts = sqlx::query_as::<_, Receipt>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(receipts.len());
    for receipt in receipts {
        let payments = payments_by_receipt(pool, receipt.id).await?;
        let payment_history_on_account = on_account_by_receipt(pool, receipt.id).await?;
        out.push(ReceiptWithPayments {
            receipt,
            payments,
            payment_history_on_account,
        });
    }
    Ok(out)
}

pub async fn with_payments(pool: &SqlitePool, receipt: Receipt) -> RepoResult<ReceiptWithPayments> {
    let payments = payments_by_receipt(pool, receipt.id).await?;
    let payment_history_on_account = on_account_by_receipt(pool, receipt.id).await?;
    Ok(ReceiptWithPayments {
        receipt,
        payments,
        payment_history_on_account,
    })
}

// ========== Transactional primitives ==========

/// Open the next PENDING billing cycle for a customer.
///
/// The partial unique index on `(customer_id) WHERE status = 'PENDING'`
/// turns a double-issue into a `Duplicate` error.
pub async fn insert_pending(
    tx: &mut SqliteTx<'_>,
    customer_id: i64,
    price: f64,
    start_date: &str,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let barcode = format!("{id}");
    sqlx::query(
        "INSERT INTO receipt (id, customer_id, status, price, start_amount, start_date, barcode, created_at, updated_at) VALUES (?1, ?2, 'PENDING', ?3, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(price)
    .bind(start_date)
    .bind(&barcode)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(id)
}

/// Next sequential receipt number (assigned on payment)
pub async fn next_receipt_number(tx: &mut SqliteTx<'_>) -> RepoResult<i64> {
    let max: Option<i64> =
        sqlx::query_scalar("SELECT MAX(receipt_number) FROM receipt")
            .fetch_one(&mut **tx)
            .await?;
    Ok(max.unwrap_or(0) + 1)
}

pub async fn mark_paid(
    tx: &mut SqliteTx<'_>,
    id: i64,
    payment_date: &str,
    payment_type: PaymentType,
    receipt_number: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE receipt SET status = 'PAID', payment_date = ?1, payment_type = ?2, receipt_number = ?3, updated_at = ?4 WHERE id = ?5 AND status = 'PENDING'",
    )
    .bind(payment_date)
    .bind(payment_type)
    .bind(receipt_number)
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Receipt {id} not found or not pending"
        )));
    }
    Ok(())
}

/// Revert a paid receipt to PENDING with the given amount due.
pub async fn revert_to_pending(tx: &mut SqliteTx<'_>, id: i64, price: f64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE receipt SET status = 'PENDING', price = ?1, payment_date = NULL, payment_type = NULL, receipt_number = NULL, updated_at = ?2 WHERE id = ?3 AND status = 'PAID'",
    )
    .bind(price)
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Receipt {id} not found or not paid"
        )));
    }
    Ok(())
}

pub async fn insert_payment(
    tx: &mut SqliteTx<'_>,
    receipt_id: i64,
    payment_type: PaymentType,
    price: f64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO receipt_payment (id, receipt_id, payment_type, price, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(shared::util::snowflake_id())
    .bind(receipt_id)
    .bind(payment_type)
    .bind(price)
    .bind(shared::util::now_millis())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn delete_payments(tx: &mut SqliteTx<'_>, receipt_id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM receipt_payment WHERE receipt_id = ?")
        .bind(receipt_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn insert_on_account(
    tx: &mut SqliteTx<'_>,
    receipt_id: i64,
    payment_type: PaymentType,
    price: f64,
    payment_date: &str,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO on_account_payment (id, receipt_id, payment_type, price, payment_date, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(shared::util::snowflake_id())
    .bind(receipt_id)
    .bind(payment_type)
    .bind(price)
    .bind(payment_date)
    .bind(shared::util::now_millis())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Adjust the amount still due on a receipt
pub async fn set_price(tx: &mut SqliteTx<'_>, id: i64, price: f64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query("UPDATE receipt SET price = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(price)
        .bind(now)
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Delete a receipt that never received payments (used when cancelling the
/// auto-issued next cycle)
pub async fn delete_in_tx(tx: &mut SqliteTx<'_>, id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM receipt WHERE id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM receipt WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Sum of partial payments already applied to a receipt
pub async fn sum_on_account(pool: &SqlitePool, receipt_id: i64) -> RepoResult<f64> {
    let sum: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(price) FROM on_account_payment WHERE receipt_id = ?",
    )
    .bind(receipt_id)
    .fetch_one(pool)
    .await?;
    Ok(sum.unwrap_or(0.0))
}

/// Whether a receipt has any payment activity at all
pub async fn has_activity(pool: &SqlitePool, receipt_id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM receipt_payment WHERE receipt_id = ?1) + (SELECT COUNT(*) FROM on_account_payment WHERE receipt_id = ?1)",
    )
    .bind(receipt_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
