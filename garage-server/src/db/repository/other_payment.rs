//! Day-sheet (box list) Repository

use super::{RepoError, RepoResult};
use shared::models::{OtherPayment, OtherPaymentCreate};
use sqlx::{SqlitePool, Transaction};

const SELECT: &str =
    "SELECT id, description, price, payment_date, receipt_id, created_at FROM other_payment";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OtherPayment>> {
    let sql = format!("{SELECT} ORDER BY payment_date DESC, created_at DESC");
    let rows = sqlx::query_as::<_, OtherPayment>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<OtherPayment>> {
    let sql = format!("{SELECT} WHERE payment_date = ? ORDER BY created_at");
    let rows = sqlx::query_as::<_, OtherPayment>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OtherPayment>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, OtherPayment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: OtherPaymentCreate) -> RepoResult<OtherPayment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO other_payment (id, description, price, payment_date, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.payment_date)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create movement".into()))
}

// ========== Receipt-linked movements (transactional) ==========

/// Movement written when a receipt is paid; removed again on cancel.
pub async fn insert_for_receipt(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    receipt_id: i64,
    description: &str,
    price: f64,
    payment_date: &str,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO other_payment (id, description, price, payment_date, receipt_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(shared::util::snowflake_id())
    .bind(description)
    .bind(price)
    .bind(payment_date)
    .bind(receipt_id)
    .bind(shared::util::now_millis())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Movement with no receipt link (e.g. a compensating refund after a
/// cancel, which must survive later cancels of the same receipt).
pub async fn insert_movement(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    description: &str,
    price: f64,
    payment_date: &str,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO other_payment (id, description, price, payment_date, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(shared::util::snowflake_id())
    .bind(description)
    .bind(price)
    .bind(payment_date)
    .bind(shared::util::now_millis())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Drop the day-sheet movements a receipt produced
pub async fn delete_for_receipt(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    receipt_id: i64,
) -> RepoResult<()> {
    sqlx::query("DELETE FROM other_payment WHERE receipt_id = ?")
        .bind(receipt_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
