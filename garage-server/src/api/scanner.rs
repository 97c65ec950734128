//! Scanner API
//!
//! Single endpoint the console's barcode feed posts to.

use axum::{Json, Router, extract::State, routing::post};

use crate::core::ServerState;
use crate::scanner::{ScanRequest, ScanResolution, resolve};
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/scanner", post(scan))
}

/// POST /api/scanner
pub async fn scan(
    State(state): State<ServerState>,
    Json(payload): Json<ScanRequest>,
) -> AppResult<Json<ScanResolution>> {
    Ok(Json(resolve(&state.pool, &payload.barcode).await?))
}
