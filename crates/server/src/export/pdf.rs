//! PDF rendering of the picking list.
//!
//! A4 portrait, one title page header, then a six-column table that flows
//! across as many pages as the row count requires. Pagination is handled
//! here; callers just hand over the rows.

use chrono::Local;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use meli_picking_core::PickingRow;

use super::{ExportError, HEADERS};

// A4 portrait, millimeters
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 16.0;

const TITLE_SIZE: f32 = 18.0;
const META_SIZE: f32 = 10.0;
const HEADER_SIZE: f32 = 9.0;
const ROW_SIZE: f32 = 9.0;
const ROW_STEP: f32 = 6.0;

/// Left edge of each table column, in millimeters.
const COLUMN_X: [f32; 6] = [14.0, 66.0, 92.0, 112.0, 156.0, 180.0];

/// Rough per-column character budget so long values don't bleed into the
/// next column. Helvetica at 9pt fits ~2 chars per millimeter of budget.
const COLUMN_CHARS: [usize; 6] = [30, 14, 10, 25, 13, 17];

/// Render picking rows to PDF bytes.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when there are no rows, or
/// [`ExportError::Pdf`] if document assembly fails.
pub fn to_pdf(rows: &[PickingRow]) -> Result<Vec<u8>, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Picking List",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "picking-list",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // Title block on the first page only
    layer.use_text(
        "Picking List - Lista de Separação",
        TITLE_SIZE,
        Mm(MARGIN_LEFT),
        Mm(PAGE_HEIGHT - 20.0),
        &bold,
    );
    layer.use_text(
        format!("Data: {}", Local::now().format("%d/%m/%Y")),
        META_SIZE,
        Mm(MARGIN_LEFT),
        Mm(PAGE_HEIGHT - 28.0),
        &font,
    );

    let mut y = PAGE_HEIGHT - 38.0;
    draw_header(&layer, &bold, y);
    y -= ROW_STEP + 1.0;

    for row in rows {
        if y < MARGIN_BOTTOM {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "picking-list");
            layer = doc.get_page(page).get_layer(page_layer);

            y = PAGE_HEIGHT - 20.0;
            draw_header(&layer, &bold, y);
            y -= ROW_STEP + 1.0;
        }

        draw_row(&layer, &font, row, y);
        y -= ROW_STEP;
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Draw the column header line.
fn draw_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    for (i, header) in HEADERS.iter().enumerate() {
        layer.use_text(*header, HEADER_SIZE, Mm(COLUMN_X[i]), Mm(y), bold);
    }
}

/// Draw one table row.
fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, row: &PickingRow, y: f32) {
    let cells = [
        clip(&row.product_name, COLUMN_CHARS[0]),
        clip(&row.sku, COLUMN_CHARS[1]),
        row.quantity.to_string(),
        clip(&row.storage_location, COLUMN_CHARS[3]),
        clip(&row.external_order_id, COLUMN_CHARS[4]),
        clip(&row.buyer_name, COLUMN_CHARS[5]),
    ];

    for (i, cell) in cells.iter().enumerate() {
        layer.use_text(cell.as_str(), ROW_SIZE, Mm(COLUMN_X[i]), Mm(y), font);
    }
}

/// Truncate a value to its column's character budget, char-boundary safe.
fn clip(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let kept: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(product: &str) -> PickingRow {
        PickingRow {
            product_name: product.to_string(),
            sku: "SKU-001".to_string(),
            quantity: 1,
            storage_location: "Corredor A - Prateleira 3".to_string(),
            external_order_id: "ML-2024-001".to_string(),
            buyer_name: "João Silva".to_string(),
        }
    }

    #[test]
    fn test_empty_input_is_guarded() {
        assert!(matches!(to_pdf(&[]), Err(ExportError::Empty)));
    }

    #[test]
    fn test_produces_pdf_bytes() {
        let bytes = to_pdf(&[row("Tênis Esportivo Nike")]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_many_rows_paginate() {
        let rows: Vec<PickingRow> = (0..200).map(|i| row(&format!("Produto {i}"))).collect();
        let bytes = to_pdf(&rows).unwrap();

        // 200 rows cannot fit one A4 page; the document must carry several.
        // lopdf writes dictionaries without spaces; the trailing slash keeps
        // the page-tree node (/Type/Pages) out of the count.
        let body = String::from_utf8_lossy(&bytes);
        let pages = body.matches("/Type/Page/").count();
        assert!(pages > 1, "expected multiple pages, got {pages}");
    }

    #[test]
    fn test_clip_preserves_short_values() {
        assert_eq!(clip("Boné", 10), "Boné");
    }

    #[test]
    fn test_clip_truncates_on_char_boundary() {
        let clipped = clip("Tênis Esportivo Nike Air Max 2024", 10);
        assert_eq!(clipped.chars().count(), 10);
        assert!(clipped.ends_with('…'));
    }
}
