//! HTTP route handlers for the picking server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (database ping)
//!
//! # Mercado Livre OAuth (PKCE)
//! GET  /auth/meli/login     - Redirect to the authorization page
//! GET  /auth/meli/callback  - Handle callback, exchange code for token
//! POST /auth/meli/logout    - Clear authentication state
//!
//! # Picking list (requires login)
//! GET  /dashboard           - Summary + picking rows (JSON)
//! POST /orders/sync         - Import paid orders from the marketplace
//! GET  /export/csv          - Download the picking list as CSV
//! GET  /export/pdf          - Download the picking list as PDF
//! ```

pub mod auth;
pub mod dashboard;
pub mod export;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the application router (health endpoints are added in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/meli/login", get(auth::login))
        .route("/auth/meli/callback", get(auth::callback))
        .route("/auth/meli/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/orders/sync", post(orders::sync))
        .route("/export/csv", get(export::csv))
        .route("/export/pdf", get(export::pdf))
}
