//! Order synchronization route.

use axum::{Json, extract::State};
use tower_sessions::Session;

use meli_picking_core::OrderStatus;

use crate::db::{ImportReport, OrderRepository};
use crate::error::Result;
use crate::meli::{RawOrder, mock};
use crate::models::AuthSession;
use crate::routes::dashboard::require_login;
use crate::state::AppState;

/// Pull paid orders from the marketplace and import them.
///
/// In demo mode the fixed demo batch is imported instead of calling the
/// marketplace. Import is partial-failure tolerant; the report carries the
/// imported/skipped counts for both orders and items.
///
/// # Route
///
/// `POST /orders/sync`
pub async fn sync(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ImportReport>> {
    let token = require_login(&AuthSession::new(session)).await?;

    let batch: Vec<RawOrder> = if state.config().meli.demo_mode {
        tracing::info!("Demo mode: importing the fixed demo batch");
        mock::demo_orders()
    } else {
        let me = state.meli().get_me(&token).await?;
        let found = state.meli().search_paid_orders(&token, me.id).await?;
        tracing::info!(seller_id = me.id, orders = found.len(), "Fetched paid orders");
        found
    };

    let repo = OrderRepository::new(state.pool());
    let report = repo.import_batch(&batch, OrderStatus::Paid).await;

    tracing::info!(
        orders_imported = report.orders_imported,
        orders_skipped = report.orders_skipped,
        items_imported = report.items_imported,
        items_skipped = report.items_skipped,
        "Order sync finished"
    );

    Ok(Json(report))
}
