//! Note API

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use shared::models::{Note, NoteCreate};

use crate::core::ServerState;
use crate::db::repository::note;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/notes", get(list).post(create))
        .route(
            "/api/notes/{id}",
            axum::routing::patch(update).delete(delete_note),
        )
}

fn validate_payload(payload: &NoteCreate) -> AppResult<()> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    Ok(())
}

/// GET /api/notes
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Note>>> {
    Ok(Json(note::find_all(&state.pool).await?))
}

/// POST /api/notes
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NoteCreate>,
) -> AppResult<Json<Note>> {
    validate_payload(&payload)?;
    Ok(Json(note::create(&state.pool, payload).await?))
}

/// PATCH /api/notes/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<NoteCreate>,
) -> AppResult<Json<Note>> {
    validate_payload(&payload)?;
    Ok(Json(note::update(&state.pool, id, payload).await?))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    if !note::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Note {id} not found")));
    }
    Ok(Json(()))
}
