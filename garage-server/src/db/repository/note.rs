//! Note Repository

use super::{RepoError, RepoResult};
use shared::models::{Note, NoteCreate};
use sqlx::SqlitePool;

const SELECT: &str = "SELECT id, title, description, created_at, updated_at FROM note";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Note>> {
    let sql = format!("{SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Note>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Note>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Note>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: NoteCreate) -> RepoResult<Note> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO note (id, title, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create note".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: NoteCreate) -> RepoResult<Note> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE note SET title = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Note {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Note {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM note WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
