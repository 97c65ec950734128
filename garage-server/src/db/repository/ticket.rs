//! Ticket Repository

use super::{RepoError, RepoResult};
use shared::models::{
    Ticket, TicketCreate, TicketRegistration, TicketRegistrationForDay,
    TicketRegistrationForDayCreate,
};
use sqlx::SqlitePool;

const TICKET_SELECT: &str = "SELECT id, code_bar, vehicle_type, ticket_time_price, price, created_at, updated_at FROM ticket";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Ticket>> {
    let sql = format!("{TICKET_SELECT} ORDER BY vehicle_type, ticket_time_price");
    let rows = sqlx::query_as::<_, Ticket>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Ticket>> {
    let sql = format!("{TICKET_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Ticket>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_code_bar(pool: &SqlitePool, code_bar: &str) -> RepoResult<Option<Ticket>> {
    let sql = format!("{TICKET_SELECT} WHERE code_bar = ?");
    let row = sqlx::query_as::<_, Ticket>(&sql)
        .bind(code_bar)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: TicketCreate) -> RepoResult<Ticket> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO ticket (id, code_bar, vehicle_type, ticket_time_price, price, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.code_bar)
    .bind(&data.vehicle_type)
    .bind(&data.ticket_time_price)
    .bind(data.price)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create ticket".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: TicketCreate) -> RepoResult<Ticket> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE ticket SET code_bar = ?1, vehicle_type = ?2, ticket_time_price = ?3, price = ?4, updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.code_bar)
    .bind(&data.vehicle_type)
    .bind(&data.ticket_time_price)
    .bind(data.price)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Ticket {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Ticket {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM ticket WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ========== Registrations ==========

pub async fn find_registrations(pool: &SqlitePool) -> RepoResult<Vec<TicketRegistration>> {
    let rows = sqlx::query_as::<_, TicketRegistration>(
        "SELECT id, ticket_id, description, price, entry_time, created_at FROM ticket_registration ORDER BY entry_time DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Register a scanned ticket at the current time
pub async fn register_scan(pool: &SqlitePool, ticket: &Ticket) -> RepoResult<TicketRegistration> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let description = format!("Ticket {} {}", ticket.vehicle_type, ticket.ticket_time_price);
    sqlx::query(
        "INSERT INTO ticket_registration (id, ticket_id, description, price, entry_time, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(ticket.id)
    .bind(&description)
    .bind(ticket.price)
    .bind(now)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, TicketRegistration>(
        "SELECT id, ticket_id, description, price, entry_time, created_at FROM ticket_registration WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

// ========== Day / week registrations ==========

pub async fn find_day_registrations(
    pool: &SqlitePool,
) -> RepoResult<Vec<TicketRegistrationForDay>> {
    let rows = sqlx::query_as::<_, TicketRegistrationForDay>(
        "SELECT id, description, price, weeks, start_date, created_at, updated_at FROM ticket_registration_for_day ORDER BY start_date DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create_day_registration(
    pool: &SqlitePool,
    data: TicketRegistrationForDayCreate,
) -> RepoResult<TicketRegistrationForDay> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO ticket_registration_for_day (id, description, price, weeks, start_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.weeks)
    .bind(&data.start_date)
    .bind(now)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, TicketRegistrationForDay>(
        "SELECT id, description, price, weeks, start_date, created_at, updated_at FROM ticket_registration_for_day WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete_day_registration(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM ticket_registration_for_day WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
