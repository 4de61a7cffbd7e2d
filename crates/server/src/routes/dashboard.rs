//! Dashboard route: the picking-list data contract.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;

use meli_picking_core::{PickingRow, PickingSummary, picking_rows, summarize};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::AuthSession;
use crate::state::AppState;

/// Dashboard payload: summary counters plus the flattened picking list.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Aggregate counters over the picking list.
    pub summary: PickingSummary,
    /// One row per order item, newest item first.
    pub rows: Vec<PickingRow>,
}

/// Serve the picking list for the logged-in seller.
///
/// Orders and items are fetched independently and joined in memory; an item
/// whose order is missing still appears, with "N/A" placeholders.
///
/// # Route
///
/// `GET /dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardResponse>> {
    require_login(&AuthSession::new(session)).await?;

    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_orders().await?;
    let items = repo.list_items().await?;

    let rows = picking_rows(&items, &orders);
    let summary = summarize(&orders, &items);

    Ok(Json(DashboardResponse { summary, rows }))
}

/// Reject the request unless the session carries an access token.
pub async fn require_login(auth: &AuthSession) -> Result<String> {
    auth.token()
        .await?
        .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))
}
