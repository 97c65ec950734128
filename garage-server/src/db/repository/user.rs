//! User Repository
//!
//! Operator accounts. Passwords are argon2-hashed here before they touch
//! the database; plaintext never leaves the handler scope.

use super::{RepoError, RepoResult};
use shared::models::{User, UserCreate, UserUpdate};
use sqlx::SqlitePool;

const SELECT: &str =
    "SELECT id, username, display_name, password_hash, created_at, updated_at FROM user";

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify password using argon2
pub fn verify_password(hash: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("{SELECT} ORDER BY username");
    let rows = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    let hash = hash_password(&data.password)
        .map_err(|e| RepoError::Validation(format!("Failed to hash password: {e}")))?;
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO user (id, username, display_name, password_hash, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.username)
    .bind(&data.display_name)
    .bind(&hash)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user SET username = COALESCE(?1, username), display_name = COALESCE(?2, display_name), updated_at = ?3 WHERE id = ?4",
    )
    .bind(&data.username)
    .bind(&data.display_name)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn change_password(pool: &SqlitePool, id: i64, password: &str) -> RepoResult<()> {
    let hash = hash_password(password)
        .map_err(|e| RepoError::Validation(format!("Failed to hash password: {e}")))?;
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE user SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(&hash)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("garage-mitre-2024").unwrap();
        assert!(verify_password(&hash, "garage-mitre-2024").unwrap());
        assert!(!verify_password(&hash, "wrong-password").unwrap());
    }
}
