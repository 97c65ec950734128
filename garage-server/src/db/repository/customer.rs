//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{
    Customer, CustomerCreate, CustomerType, CustomerUpdate, Vehicle, VehicleCreate,
    VehicleRenter, VehicleRenterCreate,
};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, first_name, last_name, address, document_number, customer_type, number_of_vehicles, deleted_at, created_at, updated_at FROM customer";

const VEHICLE_SELECT: &str = "SELECT id, customer_id, garage_number, amount, parking_type_id, created_at, updated_at FROM vehicle";

const RENTER_SELECT: &str = "SELECT id, customer_id, garage_number, amount, owner, owner_vehicle_id, created_at, updated_at FROM vehicle_renter";

pub async fn find_by_type(pool: &SqlitePool, ty: CustomerType) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE customer_type = ?");
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(ty)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let rows = sqlx::query_as::<_, Customer>(CUSTOMER_SELECT)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn vehicles_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Vehicle>> {
    let sql = format!("{VEHICLE_SELECT} WHERE customer_id = ? ORDER BY garage_number");
    let rows = sqlx::query_as::<_, Vehicle>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn renters_by_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> RepoResult<Vec<VehicleRenter>> {
    let sql = format!("{RENTER_SELECT} WHERE customer_id = ? ORDER BY garage_number");
    let rows = sqlx::query_as::<_, VehicleRenter>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Full name of the customer owning a vehicle, if any (used by the billing
/// export to resolve a renter spot's real owner).
pub async fn vehicle_owner_name(pool: &SqlitePool, vehicle_id: i64) -> RepoResult<Option<String>> {
    let row: Option<(String, String)> = sqlx::query_as(
        "SELECT c.first_name, c.last_name FROM vehicle v JOIN customer c ON c.id = v.customer_id WHERE v.id = ?",
    )
    .bind(vehicle_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(first, last)| format!("{first} {last}")))
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let spot_count = data.vehicles.len() + data.vehicle_renters.len();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO customer (id, first_name, last_name, address, document_number, customer_type, number_of_vehicles, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.address)
    .bind(&data.document_number)
    .bind(data.customer_type)
    .bind(spot_count as i64)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for v in &data.vehicles {
        insert_vehicle(&mut tx, id, v, now).await?;
    }
    for r in &data.vehicle_renters {
        insert_renter(&mut tx, id, r, now).await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

async fn insert_vehicle(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    customer_id: i64,
    data: &VehicleCreate,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO vehicle (id, customer_id, garage_number, amount, parking_type_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(shared::util::snowflake_id())
    .bind(customer_id)
    .bind(&data.garage_number)
    .bind(data.amount)
    .bind(data.parking_type_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_renter(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    customer_id: i64,
    data: &VehicleRenterCreate,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO vehicle_renter (id, customer_id, garage_number, amount, owner, owner_vehicle_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(shared::util::snowflake_id())
    .bind(customer_id)
    .bind(&data.garage_number)
    .bind(data.amount)
    .bind(&data.owner)
    .bind(data.owner_vehicle_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customer SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), address = COALESCE(?3, address), document_number = COALESCE(?4, document_number), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.address)
    .bind(&data.document_number)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// Hard delete. Vehicles, renter spots and receipts cascade.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Mark a customer as soft-deleted. Already-deleted customers are left alone.
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customer SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Customer {id} not found or already deleted"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// Clear the soft-delete marker.
pub async fn restore(pool: &SqlitePool, id: i64) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customer SET deleted_at = NULL, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NOT NULL",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Customer {id} not found or not deleted"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}
