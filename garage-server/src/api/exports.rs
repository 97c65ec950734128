//! Billing export API

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::export;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/exports/receipts", get(receipts))
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub month: u32,
    pub year: i32,
}

/// GET /api/exports/receipts?month=&year=
///
/// Returns the month's billing sheet as an `.xlsx` download.
pub async fn receipts(
    State(state): State<ServerState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let rows = export::collect_rows(&state.pool, query.month, query.year).await?;
    let bytes = export::write_workbook(&rows)?;
    let disposition = format!(
        "attachment; filename=\"recibos-{}-{:02}.xlsx\"",
        query.year, query.month
    );
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
