//! Monthly billing export
//!
//! One `.xlsx` row per receipt whose billing cycle starts in the requested
//! month. Row computation is pure and tested; the workbook itself is plain
//! rows plus a bold header.

use rust_xlsxwriter::{Format, Workbook};
use sqlx::SqlitePool;

use shared::models::{Customer, ManualOwner, Receipt, ReceiptStatus};

use crate::db::repository::{customer, receipt};
use crate::utils::{AppError, AppResult};

/// One row of the export sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub customer: String,
    pub garage_numbers: String,
    pub owner: String,
    pub amount: f64,
    /// "Si" iff the receipt is PAID
    pub paid: String,
    pub payment_date: String,
}

const HEADERS: [&str; 6] = [
    "Cliente",
    "Cocheras",
    "Dueño",
    "Monto",
    "¿Pagó este mes?",
    "Fecha de pago",
];

/// "¿Pagó este mes?" column value
pub fn paid_label(status: ReceiptStatus) -> &'static str {
    match status {
        ReceiptStatus::Paid => "Si",
        ReceiptStatus::Pending => "No",
    }
}

/// "Dueño" column value for a renter spot.
///
/// Manual-owner constants map to their display labels; a spot backed by a
/// real vehicle shows that vehicle's owning customer; anything else passes
/// through as typed.
pub fn resolve_owner_label(raw: &str, real_owner: Option<&str>) -> String {
    if let Some(manual) = ManualOwner::from_raw(raw) {
        return manual.label().to_string();
    }
    match real_owner {
        Some(name) => name.to_string(),
        None => raw.to_string(),
    }
}

fn build_row(target: &Customer, garage_numbers: String, owner: String, rec: &Receipt) -> ExportRow {
    ExportRow {
        customer: target.full_name(),
        garage_numbers,
        owner,
        amount: rec.start_amount,
        paid: paid_label(rec.status).to_string(),
        payment_date: rec.payment_date.clone().unwrap_or_default(),
    }
}

/// Collect the export rows for a month.
pub async fn collect_rows(pool: &SqlitePool, month: u32, year: i32) -> AppResult<Vec<ExportRow>> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!("Invalid month: {month}")));
    }

    let receipts = receipt::find_by_month(pool, year, month).await?;
    let mut rows = Vec::with_capacity(receipts.len());
    for rec in receipts {
        let Some(target) = customer::find_by_id(pool, rec.customer_id).await? else {
            continue;
        };

        let (garage_numbers, owner) = if target.customer_type.uses_renter_collection() {
            let spots = customer::renters_by_customer(pool, target.id).await?;
            let numbers = spots
                .iter()
                .map(|s| s.garage_number.clone())
                .collect::<Vec<_>>()
                .join(", ");
            let owner = match spots.first() {
                Some(spot) => {
                    let real = match spot.owner_vehicle_id {
                        Some(vehicle_id) => {
                            customer::vehicle_owner_name(pool, vehicle_id).await?
                        }
                        None => None,
                    };
                    resolve_owner_label(&spot.owner, real.as_deref())
                }
                None => String::new(),
            };
            (numbers, owner)
        } else {
            let spots = customer::vehicles_by_customer(pool, target.id).await?;
            let numbers = spots
                .iter()
                .map(|s| s.garage_number.clone())
                .collect::<Vec<_>>()
                .join(", ");
            (numbers, String::new())
        };

        rows.push(build_row(&target, garage_numbers, owner, &rec));
    }
    Ok(rows)
}

/// Serialize rows into an `.xlsx` byte buffer.
pub fn write_workbook(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.customer).map_err(xlsx_err)?;
        sheet.write_string(r, 1, &row.garage_numbers).map_err(xlsx_err)?;
        sheet.write_string(r, 2, &row.owner).map_err(xlsx_err)?;
        sheet.write_number(r, 3, row.amount).map_err(xlsx_err)?;
        sheet.write_string(r, 4, &row.paid).map_err(xlsx_err)?;
        sheet.write_string(r, 5, &row.payment_date).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::internal(format!("Failed to build workbook: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::receipts::service::{issue_initial_pending, register_payment};
    use shared::models::{
        CustomerCreate, CustomerType, PaymentEntry, PaymentType, RegisterPaymentRequest,
        VehicleCreate, VehicleRenterCreate,
    };

    #[test]
    fn paid_label_is_si_only_for_paid() {
        assert_eq!(paid_label(ReceiptStatus::Paid), "Si");
        assert_eq!(paid_label(ReceiptStatus::Pending), "No");
    }

    #[test]
    fn manual_owner_constants_map_to_labels() {
        assert_eq!(
            resolve_owner_label("JOSE_FERNANDEZ", None),
            "José Fernández"
        );
        assert_eq!(
            resolve_owner_label("CONSORCIO_MITRE", Some("ignored")),
            "Consorcio Mitre"
        );
    }

    #[test]
    fn real_owner_beats_the_raw_string() {
        assert_eq!(
            resolve_owner_label("whoever", Some("Laura Gimenez")),
            "Laura Gimenez"
        );
    }

    #[test]
    fn unknown_owner_passes_through() {
        assert_eq!(resolve_owner_label("Sr. Gomez", None), "Sr. Gomez");
    }

    #[tokio::test]
    async fn rows_cover_the_month_and_flag_paid_receipts() {
        let db = DbService::in_memory().await.unwrap();
        let owner = customer::create(
            &db.pool,
            CustomerCreate {
                first_name: "Laura".into(),
                last_name: "Gimenez".into(),
                address: "Mitre 540".into(),
                document_number: None,
                customer_type: CustomerType::Owner,
                vehicles: vec![VehicleCreate {
                    garage_number: "12".into(),
                    amount: 5000.0,
                    parking_type_id: None,
                }],
                vehicle_renters: vec![],
            },
        )
        .await
        .unwrap();
        let pending = issue_initial_pending(&db.pool, owner.id).await.unwrap();
        register_payment(
            &db.pool,
            owner.id,
            None,
            &RegisterPaymentRequest {
                payments: vec![PaymentEntry {
                    payment_type: PaymentType::Cash,
                    price: None,
                }],
                on_account: false,
                print: false,
                barcode: None,
            },
        )
        .await
        .unwrap();

        let start = crate::utils::time::parse_date(&pending.start_date).unwrap();
        use chrono::Datelike;
        let rows = collect_rows(&db.pool, start.month(), start.year())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer, "Laura Gimenez");
        assert_eq!(rows[0].garage_numbers, "12");
        assert_eq!(rows[0].paid, "Si");
        assert_eq!(rows[0].amount, 5000.0);
    }

    #[tokio::test]
    async fn private_customer_rows_carry_the_owner_column() {
        let db = DbService::in_memory().await.unwrap();
        let tenant = customer::create(
            &db.pool,
            CustomerCreate {
                first_name: "Pedro".into(),
                last_name: "Luna".into(),
                address: "Alsina 20".into(),
                document_number: None,
                customer_type: CustomerType::Private,
                vehicles: vec![],
                vehicle_renters: vec![VehicleRenterCreate {
                    garage_number: "7".into(),
                    amount: 4000.0,
                    owner: "MARTA_SUAREZ".into(),
                    owner_vehicle_id: None,
                }],
            },
        )
        .await
        .unwrap();
        let pending = issue_initial_pending(&db.pool, tenant.id).await.unwrap();

        let start = crate::utils::time::parse_date(&pending.start_date).unwrap();
        use chrono::Datelike;
        let rows = collect_rows(&db.pool, start.month(), start.year())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].owner, "Marta Suárez");
        assert_eq!(rows[0].paid, "No");
    }

    #[tokio::test]
    async fn invalid_month_is_rejected() {
        let db = DbService::in_memory().await.unwrap();
        assert!(collect_rows(&db.pool, 13, 2026).await.is_err());
    }

    #[test]
    fn workbook_bytes_are_a_zip() {
        let rows = vec![ExportRow {
            customer: "Laura Gimenez".into(),
            garage_numbers: "12".into(),
            owner: String::new(),
            amount: 5000.0,
            paid: "Si".into(),
            payment_date: "2026-08-10".into(),
        }];
        let bytes = write_workbook(&rows).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }
}
