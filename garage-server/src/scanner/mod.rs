//! Scanner intake
//!
//! A single barcode feed drives two flows: receipt barcodes open the
//! payment dialog on the console, ticket codes register an hourly parking
//! entry on the spot. Resolution is a tagged enum so the console can only
//! ever route a TICKET to the ticket path.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use shared::models::{Receipt, TicketRegistration};

use crate::db::repository::{receipt, ticket};
use crate::utils::{AppError, AppResult};

/// Scan request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub barcode: String,
}

/// What a scanned barcode turned out to be
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ScanResolution {
    /// A receipt barcode: the console opens the payment dialog
    #[serde(rename_all = "camelCase")]
    Receipt {
        /// Customer the receipt belongs to
        id: i64,
        barcode: String,
        receipt_id: i64,
        receipt: Receipt,
    },
    /// A ticket code: the entry was registered at scan time
    #[serde(rename_all = "camelCase")]
    Ticket { registration: TicketRegistration },
}

/// Resolve a scanned barcode.
///
/// Receipt barcodes win over ticket codes; an unknown code is a not-found
/// error the console surfaces as a toast.
pub async fn resolve(pool: &SqlitePool, barcode: &str) -> AppResult<ScanResolution> {
    let code = barcode.trim();
    if code.is_empty() {
        return Err(AppError::validation("Scanned barcode is empty"));
    }

    if let Some(found) = receipt::find_by_barcode(pool, code).await? {
        info!(barcode = code, receipt_id = found.id, "Scan resolved to a receipt");
        return Ok(ScanResolution::Receipt {
            id: found.customer_id,
            barcode: found.barcode.clone(),
            receipt_id: found.id,
            receipt: found,
        });
    }

    if let Some(price_entry) = ticket::find_by_code_bar(pool, code).await? {
        let registration = ticket::register_scan(pool, &price_entry).await?;
        info!(barcode = code, registration_id = registration.id, "Scan registered a ticket");
        return Ok(ScanResolution::Ticket { registration });
    }

    Err(AppError::not_found(format!("Unknown barcode: {code}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::customer;
    use crate::receipts::service::issue_initial_pending;
    use shared::models::{CustomerCreate, CustomerType, TicketCreate, VehicleCreate};

    async fn seed_customer_with_pending(db: &DbService) -> (i64, Receipt) {
        let created = customer::create(
            &db.pool,
            CustomerCreate {
                first_name: "Hugo".into(),
                last_name: "Paredes".into(),
                address: "Belgrano 101".into(),
                document_number: None,
                customer_type: CustomerType::Owner,
                vehicles: vec![VehicleCreate {
                    garage_number: "4".into(),
                    amount: 5000.0,
                    parking_type_id: None,
                }],
                vehicle_renters: vec![],
            },
        )
        .await
        .unwrap();
        let pending = issue_initial_pending(&db.pool, created.id).await.unwrap();
        (created.id, pending)
    }

    #[tokio::test]
    async fn receipt_barcode_resolves_to_the_payment_path() {
        let db = DbService::in_memory().await.unwrap();
        let (customer_id, pending) = seed_customer_with_pending(&db).await;

        let res = resolve(&db.pool, &pending.barcode).await.unwrap();
        match res {
            ScanResolution::Receipt {
                id, receipt_id, ..
            } => {
                assert_eq!(id, customer_id);
                assert_eq!(receipt_id, pending.id);
            }
            other => panic!("expected RECEIPT, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ticket_code_registers_an_entry() {
        let db = DbService::in_memory().await.unwrap();
        ticket::create(
            &db.pool,
            TicketCreate {
                code_bar: "TCK-001".into(),
                vehicle_type: "Auto".into(),
                ticket_time_price: "Hora Diurna".into(),
                price: 800.0,
            },
        )
        .await
        .unwrap();

        let res = resolve(&db.pool, "TCK-001").await.unwrap();
        match res {
            ScanResolution::Ticket { registration } => {
                assert_eq!(registration.price, 800.0);
                assert_eq!(registration.description, "Ticket Auto Hora Diurna");
            }
            other => panic!("expected TICKET, got {other:?}"),
        }

        let registrations = ticket::find_registrations(&db.pool).await.unwrap();
        assert_eq!(registrations.len(), 1);
    }

    #[tokio::test]
    async fn ticket_never_opens_the_payment_path() {
        let db = DbService::in_memory().await.unwrap();
        let (_, pending) = seed_customer_with_pending(&db).await;
        ticket::create(
            &db.pool,
            TicketCreate {
                code_bar: "TCK-002".into(),
                vehicle_type: "Moto".into(),
                ticket_time_price: "Hora Nocturna".into(),
                price: 500.0,
            },
        )
        .await
        .unwrap();

        let res = resolve(&db.pool, "TCK-002").await.unwrap();
        assert!(matches!(res, ScanResolution::Ticket { .. }));
        // The pending receipt was not touched.
        let untouched = receipt::find_by_id(&db.pool, pending.id).await.unwrap().unwrap();
        assert_eq!(untouched.status, shared::models::ReceiptStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_barcode_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let err = resolve(&db.pool, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_barcode_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let err = resolve(&db.pool, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
