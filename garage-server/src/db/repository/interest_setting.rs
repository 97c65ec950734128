//! Interest Setting Repository
//!
//! Single-row table. The row is created on first write; reads fall back
//! to zeroed defaults so the console always has something to render.

use super::RepoResult;
use shared::models::{InterestSetting, InterestSettingUpdate};
use sqlx::SqlitePool;

const ROW_ID: i64 = 1;

pub async fn get(pool: &SqlitePool) -> RepoResult<InterestSetting> {
    let row = sqlx::query_as::<_, InterestSetting>(
        "SELECT id, interest_owner, interest_renter, interest_private, updated_at FROM interest_setting WHERE id = ?",
    )
    .bind(ROW_ID)
    .fetch_optional(pool)
    .await?;
    Ok(row.unwrap_or(InterestSetting {
        id: ROW_ID,
        interest_owner: 0.0,
        interest_renter: 0.0,
        interest_private: 0.0,
        updated_at: 0,
    }))
}

pub async fn upsert(pool: &SqlitePool, data: InterestSettingUpdate) -> RepoResult<InterestSetting> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO interest_setting (id, interest_owner, interest_renter, interest_private, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(id) DO UPDATE SET \
             interest_owner = ?2, \
             interest_renter = ?3, \
             interest_private = ?4, \
             updated_at = ?5",
    )
    .bind(ROW_ID)
    .bind(data.interest_owner)
    .bind(data.interest_renter)
    .bind(data.interest_private)
    .bind(now)
    .execute(pool)
    .await?;
    get(pool).await
}
