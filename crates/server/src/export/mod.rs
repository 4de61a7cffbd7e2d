//! Export engine: picking-list serialization to CSV and PDF.
//!
//! Both exporters are pure functions of the row sequence: order-preserving,
//! one output row per input row. The sole validation is the empty-input
//! guard, which callers turn into a "nothing to export" notice instead of
//! producing a file.

mod csv;
mod pdf;

pub use csv::to_csv;
pub use pdf::to_pdf;

use chrono::Utc;
use thiserror::Error;

/// Column headers shared by both export formats.
pub const HEADERS: [&str; 6] = [
    "Produto",
    "SKU",
    "Quantidade",
    "Local no Estoque",
    "Pedido ID",
    "Cliente",
];

/// Errors from the export engine.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export: the picking list is empty.
    #[error("Nenhum item para exportar")]
    Empty,

    /// PDF rendering failed.
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Build the download filename for an export artifact.
///
/// Uses the current Unix timestamp in milliseconds, so consecutive exports
/// get distinct names.
#[must_use]
pub fn artifact_filename(extension: &str) -> String {
    format!("picking-list-{}.{extension}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_filename_shape() {
        let name = artifact_filename("csv");
        assert!(name.starts_with("picking-list-"));
        assert!(name.ends_with(".csv"));

        let stamp = name
            .trim_start_matches("picking-list-")
            .trim_end_matches(".csv");
        assert!(stamp.parse::<i64>().is_ok());
    }
}
