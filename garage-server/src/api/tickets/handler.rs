//! Ticket API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::{
    Ticket, TicketCreate, TicketRegistration, TicketRegistrationForDay,
    TicketRegistrationForDayCreate,
};

use crate::core::ServerState;
use crate::db::repository::ticket;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, TICKET_DELETE_PHRASE, require_confirmation,
    validate_amount, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn validate_payload(payload: &TicketCreate) -> AppResult<()> {
    validate_required_text(&payload.code_bar, "codeBar", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.vehicle_type, "vehicleType", MAX_NAME_LEN)?;
    validate_required_text(&payload.ticket_time_price, "ticketTimePrice", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;
    Ok(())
}

/// GET /api/tickets
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Ticket>>> {
    Ok(Json(ticket::find_all(&state.pool).await?))
}

/// POST /api/tickets
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TicketCreate>,
) -> AppResult<Json<Ticket>> {
    validate_payload(&payload)?;
    Ok(Json(ticket::create(&state.pool, payload).await?))
}

/// PATCH /api/tickets/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TicketCreate>,
) -> AppResult<Json<Ticket>> {
    validate_payload(&payload)?;
    Ok(Json(ticket::update(&state.pool, id, payload).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub confirmation: String,
}

/// DELETE /api/tickets/{id}
pub async fn delete_ticket(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<DeleteConfirmation>,
) -> AppResult<Json<()>> {
    require_confirmation(&body.confirmation, TICKET_DELETE_PHRASE)?;
    if !ticket::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Ticket {id} not found")));
    }
    tracing::info!(ticket_id = id, "Ticket deleted");
    Ok(Json(()))
}

/// GET /api/tickets/registrations
pub async fn list_registrations(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TicketRegistration>>> {
    Ok(Json(ticket::find_registrations(&state.pool).await?))
}

/// GET /api/tickets/registrationForDays
pub async fn list_day_registrations(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TicketRegistrationForDay>>> {
    Ok(Json(ticket::find_day_registrations(&state.pool).await?))
}

/// POST /api/tickets/registrationForDays
pub async fn create_day_registration(
    State(state): State<ServerState>,
    Json(payload): Json<TicketRegistrationForDayCreate>,
) -> AppResult<Json<TicketRegistrationForDay>> {
    validate_required_text(&payload.description, "description", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;
    if payload.weeks < 1 {
        return Err(AppError::validation("weeks must be at least 1"));
    }
    crate::utils::time::parse_date(&payload.start_date)?;
    Ok(Json(
        ticket::create_day_registration(&state.pool, payload).await?,
    ))
}

/// DELETE /api/tickets/registrationForDays/{id}
pub async fn delete_day_registration(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    if !ticket::delete_day_registration(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Registration {id} not found")));
    }
    Ok(Json(()))
}
