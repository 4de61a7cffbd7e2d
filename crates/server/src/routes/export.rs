//! Picking-list download routes (CSV and PDF).

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use meli_picking_core::{PickingRow, picking_rows};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::export::{self, ExportError, artifact_filename};
use crate::models::AuthSession;
use crate::routes::dashboard::require_login;
use crate::state::AppState;

/// Download the picking list as CSV.
///
/// An empty picking list answers with a plain-text notice instead of an
/// attachment.
///
/// # Route
///
/// `GET /export/csv`
pub async fn csv(State(state): State<AppState>, session: Session) -> Result<Response> {
    require_login(&AuthSession::new(session)).await?;

    let rows = load_rows(&state).await?;
    match export::to_csv(&rows) {
        Ok(body) => Ok(attachment(
            body.into_bytes(),
            "text/csv; charset=utf-8",
            &artifact_filename("csv"),
        )),
        Err(ExportError::Empty) => Ok(empty_notice()),
        Err(e) => Err(AppError::Export(e)),
    }
}

/// Download the picking list as PDF.
///
/// # Route
///
/// `GET /export/pdf`
pub async fn pdf(State(state): State<AppState>, session: Session) -> Result<Response> {
    require_login(&AuthSession::new(session)).await?;

    let rows = load_rows(&state).await?;
    match export::to_pdf(&rows) {
        Ok(body) => Ok(attachment(
            body,
            "application/pdf",
            &artifact_filename("pdf"),
        )),
        Err(ExportError::Empty) => Ok(empty_notice()),
        Err(e) => Err(AppError::Export(e)),
    }
}

/// Fetch orders and items and join them into picking rows.
async fn load_rows(state: &AppState) -> Result<Vec<PickingRow>> {
    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_orders().await?;
    let items = repo.list_items().await?;
    Ok(picking_rows(&items, &orders))
}

/// The "nothing to export" notice: a 200 with a plain-text body, no file.
fn empty_notice() -> Response {
    "Nenhum item para exportar".into_response()
}

/// Build a file-download response.
fn attachment(body: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));

    // Filenames are generated locally (picking-list-<millis>.<ext>) and are
    // always valid header values
    let disposition = format!("attachment; filename=\"{filename}\"");
    match HeaderValue::from_str(&disposition) {
        Ok(value) => {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
        Err(e) => {
            tracing::error!("Invalid Content-Disposition for {filename}: {e}");
        }
    }

    (headers, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_headers() {
        let response = attachment(b"a,b".to_vec(), "text/csv; charset=utf-8", "picking-list-1.csv");
        let headers = response.headers();

        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"picking-list-1.csv\""
        );
    }

    #[test]
    fn test_empty_notice_is_plain_ok() {
        let response = empty_notice();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
