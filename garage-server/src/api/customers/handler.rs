//! Customer API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::{
    Customer, CustomerCreate, CustomerType, CustomerUpdate, CustomerWithDetail, InterestSetting,
    InterestSettingUpdate, ParkingType, ParkingTypeCreate,
};

use crate::core::ServerState;
use crate::db::repository::{customer, interest_setting, parking_type, receipt};
use crate::receipts::service;
use crate::utils::validation::{
    CUSTOMER_DELETE_PHRASE, MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN,
    require_confirmation, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, sort};

fn parse_customer_type(raw: &str) -> AppResult<CustomerType> {
    match raw.to_uppercase().as_str() {
        "OWNER" | "OWNERS" => Ok(CustomerType::Owner),
        "RENTER" | "RENTERS" => Ok(CustomerType::Renter),
        "PRIVATE" | "PRIVATES" => Ok(CustomerType::Private),
        other => Err(AppError::validation(format!(
            "Unknown customer type: {other}"
        ))),
    }
}

fn validate_create(payload: &CustomerCreate) -> AppResult<()> {
    validate_required_text(&payload.first_name, "firstName", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "lastName", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.document_number, "documentNumber", MAX_SHORT_TEXT_LEN)?;
    for v in &payload.vehicles {
        validate_required_text(&v.garage_number, "garageNumber", MAX_NAME_LEN)?;
        validate_amount(v.amount, "amount")?;
    }
    for r in &payload.vehicle_renters {
        validate_required_text(&r.garage_number, "garageNumber", MAX_NAME_LEN)?;
        validate_required_text(&r.owner, "owner", MAX_NAME_LEN)?;
        validate_amount(r.amount, "amount")?;
    }
    // The governing collection must match the customer category.
    if payload.customer_type.uses_renter_collection() {
        if !payload.vehicles.is_empty() {
            return Err(AppError::validation(
                "RENTER/PRIVATE customers carry vehicleRenters, not vehicles",
            ));
        }
    } else if !payload.vehicle_renters.is_empty() {
        return Err(AppError::validation(
            "OWNER customers carry vehicles, not vehicleRenters",
        ));
    }
    Ok(())
}

async fn detail(state: &ServerState, target: Customer) -> AppResult<CustomerWithDetail> {
    let vehicles = customer::vehicles_by_customer(&state.pool, target.id).await?;
    let vehicle_renters = customer::renters_by_customer(&state.pool, target.id).await?;
    let receipts = receipt::find_by_customer(&state.pool, target.id).await?;
    Ok(CustomerWithDetail {
        customer: target,
        vehicles,
        vehicle_renters,
        receipts,
    })
}

/// GET /api/customers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let mut customers = customer::find_all(&state.pool).await?;
    sort::soft_deleted_last(&mut customers, |c| c.deleted_at, |c| c.last_name.clone());
    Ok(Json(customers))
}

/// GET /api/customers/customer/{type}
pub async fn list_by_type(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> AppResult<Json<Vec<Customer>>> {
    let ty = parse_customer_type(&raw)?;
    let mut customers = customer::find_by_type(&state.pool, ty).await?;
    sort::soft_deleted_last(&mut customers, |c| c.deleted_at, |c| c.last_name.clone());
    Ok(Json(customers))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CustomerWithDetail>> {
    let target = customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?;
    Ok(Json(detail(&state, target).await?))
}

/// POST /api/customers
///
/// Creating a customer opens their first billing cycle.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<CustomerWithDetail>> {
    validate_create(&payload)?;
    let created = customer::create(&state.pool, payload).await?;
    service::issue_initial_pending(&state.pool, created.id).await?;
    Ok(Json(detail(&state, created).await?))
}

/// PATCH /api/customers/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    validate_optional_text(&payload.first_name, "firstName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "lastName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.document_number, "documentNumber", MAX_SHORT_TEXT_LEN)?;
    let updated = customer::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub confirmation: String,
}

/// DELETE /api/customers/{id}
///
/// Hard delete; requires the typed confirmation phrase.
pub async fn hard_delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<DeleteConfirmation>,
) -> AppResult<Json<()>> {
    require_confirmation(&body.confirmation, CUSTOMER_DELETE_PHRASE)?;
    if !customer::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Customer {id} not found")));
    }
    tracing::info!(customer_id = id, "Customer deleted");
    Ok(Json(()))
}

/// DELETE /api/customers/softDelete/{id}
pub async fn soft_delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    Ok(Json(customer::soft_delete(&state.pool, id).await?))
}

/// PATCH /api/customers/restoredCustomer/{id}
pub async fn restore(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    Ok(Json(customer::restore(&state.pool, id).await?))
}

// ========== Interest settings ==========

/// GET /api/customers/interestSetting
pub async fn get_interest(State(state): State<ServerState>) -> AppResult<Json<InterestSetting>> {
    Ok(Json(interest_setting::get(&state.pool).await?))
}

/// POST /api/customers/interestSetting
pub async fn upsert_interest(
    State(state): State<ServerState>,
    Json(payload): Json<InterestSettingUpdate>,
) -> AppResult<Json<InterestSetting>> {
    validate_amount(payload.interest_owner, "interestOwner")?;
    validate_amount(payload.interest_renter, "interestRenter")?;
    validate_amount(payload.interest_private, "interestPrivate")?;
    Ok(Json(interest_setting::upsert(&state.pool, payload).await?))
}

// ========== Parking types ==========

/// GET /api/customers/parking/parkingTypes
pub async fn list_parking_types(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ParkingType>>> {
    Ok(Json(parking_type::find_all(&state.pool).await?))
}

/// POST /api/customers/parking/parkingTypes
pub async fn create_parking_type(
    State(state): State<ServerState>,
    Json(payload): Json<ParkingTypeCreate>,
) -> AppResult<Json<ParkingType>> {
    validate_required_text(&payload.parking_type, "parkingType", MAX_NAME_LEN)?;
    validate_amount(payload.amount, "amount")?;
    Ok(Json(parking_type::create(&state.pool, payload).await?))
}

/// PATCH /api/customers/parking/parkingTypes/{id}
pub async fn update_parking_type(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ParkingTypeCreate>,
) -> AppResult<Json<ParkingType>> {
    validate_required_text(&payload.parking_type, "parkingType", MAX_NAME_LEN)?;
    validate_amount(payload.amount, "amount")?;
    Ok(Json(parking_type::update(&state.pool, id, payload).await?))
}

/// DELETE /api/customers/parking/parkingTypes/{id}
pub async fn delete_parking_type(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    if !parking_type::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Parking type {id} not found")));
    }
    Ok(Json(()))
}
