//! CSV serialization of the picking list.

use meli_picking_core::PickingRow;

use super::{ExportError, HEADERS};

/// Serialize picking rows to CSV.
///
/// Header row `Produto,SKU,Quantidade,Local no Estoque,Pedido ID,Cliente`,
/// then one line per row with every data field double-quote-wrapped
/// (embedded quotes doubled), fields comma-joined, lines newline-joined,
/// UTF-8. A field containing a comma therefore stays a single field when
/// parsed back.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when there are no rows; no file should be
/// produced in that case.
pub fn to_csv(rows: &[PickingRow]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADERS.join(","));

    for row in rows {
        let fields = [
            quote(&row.product_name),
            quote(&row.sku),
            quote(&row.quantity.to_string()),
            quote(&row.storage_location),
            quote(&row.external_order_id),
            quote(&row.buyer_name),
        ];
        lines.push(fields.join(","));
    }

    Ok(lines.join("\n"))
}

/// Wrap a field in double quotes, doubling any embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(product: &str, sku: &str, qty: i32, location: &str, order: &str, buyer: &str) -> PickingRow {
        PickingRow {
            product_name: product.to_string(),
            sku: sku.to_string(),
            quantity: qty,
            storage_location: location.to_string(),
            external_order_id: order.to_string(),
            buyer_name: buyer.to_string(),
        }
    }

    #[test]
    fn test_empty_input_is_guarded() {
        assert!(matches!(to_csv(&[]), Err(ExportError::Empty)));
    }

    #[test]
    fn test_header_row() {
        let csv = to_csv(&[row("Boné Adidas", "ADI-CAP-001", 1, "Corredor D - Prateleira 1", "ML-2024-003", "Pedro Costa")]).unwrap();
        let first = csv.lines().next().unwrap();
        assert_eq!(first, "Produto,SKU,Quantidade,Local no Estoque,Pedido ID,Cliente");
    }

    #[test]
    fn test_fields_are_quoted() {
        let csv = to_csv(&[row("Boné Adidas", "ADI-CAP-001", 1, "Corredor D - Prateleira 1", "ML-2024-003", "Pedro Costa")]).unwrap();
        let data = csv.lines().nth(1).unwrap();
        assert_eq!(
            data,
            "\"Boné Adidas\",\"ADI-CAP-001\",\"1\",\"Corredor D - Prateleira 1\",\"ML-2024-003\",\"Pedro Costa\""
        );
    }

    #[test]
    fn test_comma_in_value_stays_one_field() {
        let csv = to_csv(&[row("Tênis, Nike", "NIKE-001", 2, "Corredor A", "ML-2024-001", "João Silva")]).unwrap();
        let data = csv.lines().nth(1).unwrap();
        assert!(data.contains("\"Tênis, Nike\""));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let rows = vec![
            row("Tênis, Nike", "NIKE-001", 2, "Corredor A - Prateleira 3", "ML-2024-001", "João Silva"),
            row("Meia Esportiva", "SOCK-001", 4, "Corredor B - Prateleira 1", "N/A", "N/A"),
        ];
        let csv = to_csv(&rows).unwrap();

        // Parse back: split lines, split on the quoted-field boundary, strip quotes
        for (line, expected) in csv.lines().skip(1).zip(&rows) {
            let inner = line.strip_prefix('"').unwrap().strip_suffix('"').unwrap();
            let fields: Vec<&str> = inner.split("\",\"").collect();
            assert_eq!(fields.len(), 6);
            assert_eq!(fields[0], expected.product_name);
            assert_eq!(fields[1], expected.sku);
            assert_eq!(fields[2], expected.quantity.to_string());
            assert_eq!(fields[3], expected.storage_location);
            assert_eq!(fields[4], expected.external_order_id);
            assert_eq!(fields[5], expected.buyer_name);
        }
    }

    #[test]
    fn test_one_line_per_row_and_order_preserved() {
        let rows = vec![
            row("B", "S1", 1, "L", "O1", "C1"),
            row("A", "S2", 2, "L", "O2", "C2"),
        ];
        let csv = to_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"B\""));
        assert!(lines[2].starts_with("\"A\""));
        // No trailing newline
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let csv = to_csv(&[row("Caneca \"Top\"", "MUG-001", 1, "Corredor C", "ML-2024-009", "Ana")]).unwrap();
        assert!(csv.contains("\"Caneca \"\"Top\"\"\""));
    }
}
