//! User API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{PasswordChange, User, UserCreate, UserUpdate};

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

const MIN_PASSWORD_LEN: usize = 8;

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("Password is too long"));
    }
    Ok(())
}

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(user::find_all(&state.pool).await?))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let found = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(Json(found))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    validate_required_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.display_name, "displayName", MAX_NAME_LEN)?;
    validate_password(&payload.password)?;
    Ok(Json(user::create(&state.pool, payload).await?))
}

/// PATCH /api/users/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    validate_optional_text(&payload.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.display_name, "displayName", MAX_NAME_LEN)?;
    Ok(Json(user::update(&state.pool, id, payload).await?))
}

/// PATCH /api/users/{id}/password
pub async fn change_password(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PasswordChange>,
) -> AppResult<Json<()>> {
    validate_password(&payload.password)?;
    user::change_password(&state.pool, id, &payload.password).await?;
    tracing::info!(user_id = id, "Password changed");
    Ok(Json(()))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    if !user::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("User {id} not found")));
    }
    Ok(Json(()))
}
