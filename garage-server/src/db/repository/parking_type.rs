//! Parking Type Repository

use super::{RepoError, RepoResult};
use shared::models::{ParkingType, ParkingTypeCreate};
use sqlx::SqlitePool;

const SELECT: &str =
    "SELECT id, parking_type, amount, created_at, updated_at FROM parking_type";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ParkingType>> {
    let sql = format!("{SELECT} ORDER BY parking_type");
    let rows = sqlx::query_as::<_, ParkingType>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ParkingType>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ParkingType>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ParkingTypeCreate) -> RepoResult<ParkingType> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO parking_type (id, parking_type, amount, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(id)
    .bind(&data.parking_type)
    .bind(data.amount)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create parking type".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ParkingTypeCreate) -> RepoResult<ParkingType> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE parking_type SET parking_type = ?1, amount = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(&data.parking_type)
    .bind(data.amount)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Parking type {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Parking type {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM parking_type WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
