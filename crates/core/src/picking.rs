//! In-memory order/item aggregation for the picking list.
//!
//! The record store returns orders and items as two independent sequences;
//! the join happens here, in memory. One [`PickingRow`] is produced per
//! [`OrderItem`], in input order, regardless of how items group into orders.
//! An item whose parent order cannot be resolved is a data-integrity gap
//! that is tolerated: its buyer/order fields render as [`MISSING_ORDER`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Order, OrderId, OrderItem};

/// Placeholder rendered for items whose parent order cannot be resolved.
pub const MISSING_ORDER: &str = "N/A";

/// One line of the picking list: an item joined with its parent order.
///
/// Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingRow {
    /// Product title.
    pub product_name: String,
    /// Seller SKU.
    pub sku: String,
    /// Units to pick.
    pub quantity: i32,
    /// Warehouse location.
    pub storage_location: String,
    /// Marketplace order ID of the parent order, or [`MISSING_ORDER`].
    pub external_order_id: String,
    /// Buyer name of the parent order, or [`MISSING_ORDER`].
    pub buyer_name: String,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingSummary {
    /// Number of imported orders.
    pub total_orders: usize,
    /// Sum of `quantity` across all items (units to separate).
    pub total_items: i64,
    /// Number of item rows. Counts rows, not distinct SKUs, matching the
    /// dashboard figure this replaces.
    pub unique_products: usize,
}

/// Find the parent [`Order`] of an item, if it exists.
///
/// Returns `None` rather than failing when the foreign key does not resolve.
#[must_use]
pub fn resolve_order<'a>(item: &OrderItem, orders: &'a [Order]) -> Option<&'a Order> {
    orders.iter().find(|o| o.id == item.order_id)
}

/// Join items with their parent orders into picking rows.
///
/// Produces exactly one row per item, preserving the input item order. The
/// lookup is hash-indexed, so the join is linear in `items + orders`.
#[must_use]
pub fn picking_rows(items: &[OrderItem], orders: &[Order]) -> Vec<PickingRow> {
    let by_id: HashMap<OrderId, &Order> = orders.iter().map(|o| (o.id, o)).collect();

    items
        .iter()
        .map(|item| {
            let order = by_id.get(&item.order_id);
            PickingRow {
                product_name: item.product_name.clone(),
                sku: item.sku.clone(),
                quantity: item.quantity,
                storage_location: item.storage_location.clone(),
                external_order_id: order
                    .map_or_else(|| MISSING_ORDER.to_string(), |o| o.external_order_id.clone()),
                buyer_name: order
                    .map_or_else(|| MISSING_ORDER.to_string(), |o| o.buyer_name.clone()),
            }
        })
        .collect()
}

/// Compute the dashboard summary for a set of orders and items.
#[must_use]
pub fn summarize(orders: &[Order], items: &[OrderItem]) -> PickingSummary {
    PickingSummary {
        total_orders: orders.len(),
        total_items: items.iter().map(|i| i64::from(i.quantity)).sum(),
        unique_products: items.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{OrderItemId, OrderStatus};

    fn order(id: i32, external: &str, buyer: &str) -> Order {
        Order {
            id: OrderId::new(id),
            external_order_id: external.to_string(),
            buyer_name: buyer.to_string(),
            buyer_address: "Av. Paulista, 1000 - São Paulo, SP".to_string(),
            total_amount: Decimal::new(29_990, 2),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn item(id: i32, order_id: i32, product: &str, qty: i32) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(id),
            order_id: OrderId::new(order_id),
            product_name: product.to_string(),
            sku: format!("SKU-{id:03}"),
            quantity: qty,
            storage_location: "Corredor A - Prateleira 3".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_one_row_per_item() {
        let orders = vec![order(1, "ML-2024-001", "João Silva"), order(2, "ML-2024-002", "Maria Santos")];
        let items = vec![
            item(1, 1, "Tênis Esportivo Nike", 2),
            item(2, 1, "Meia Esportiva", 3),
            item(3, 2, "Camisa Polo", 1),
        ];

        let rows = picking_rows(&items, &orders);

        assert_eq!(rows.len(), items.len());
        assert_eq!(rows[0].external_order_id, "ML-2024-001");
        assert_eq!(rows[0].buyer_name, "João Silva");
        assert_eq!(rows[2].external_order_id, "ML-2024-002");
    }

    #[test]
    fn test_row_order_preserved() {
        let orders = vec![order(1, "ML-2024-001", "João Silva")];
        let items = vec![
            item(10, 1, "Boné Adidas", 1),
            item(5, 1, "Relógio Casio", 1),
            item(7, 1, "Carteira de Couro", 2),
        ];

        let rows = picking_rows(&items, &orders);

        let names: Vec<_> = rows.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["Boné Adidas", "Relógio Casio", "Carteira de Couro"]);
    }

    #[test]
    fn test_unresolvable_order_renders_placeholder() {
        let orders = vec![order(1, "ML-2024-001", "João Silva")];
        let items = vec![item(1, 99, "Jaqueta de Couro", 1)];

        let rows = picking_rows(&items, &orders);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].external_order_id, MISSING_ORDER);
        assert_eq!(rows[0].buyer_name, MISSING_ORDER);
        // Item fields still come through
        assert_eq!(rows[0].product_name, "Jaqueta de Couro");
    }

    #[test]
    fn test_resolve_order() {
        let orders = vec![order(1, "ML-2024-001", "João Silva"), order(2, "ML-2024-002", "Maria Santos")];

        let found = resolve_order(&item(1, 2, "Meia Esportiva", 3), &orders);
        assert_eq!(found.unwrap().external_order_id, "ML-2024-002");

        let missing = resolve_order(&item(2, 42, "Meia Esportiva", 3), &orders);
        assert!(missing.is_none());
    }

    #[test]
    fn test_summary_counts_rows_not_skus() {
        let orders = vec![order(1, "ML-2024-001", "João Silva")];
        let mut items = vec![
            item(1, 1, "Tênis Esportivo Nike", 2),
            item(2, 1, "Meia Esportiva", 4),
        ];
        // Same SKU twice: unique_products still counts both rows
        items.push(OrderItem {
            sku: items[0].sku.clone(),
            ..item(3, 1, "Tênis Esportivo Nike", 1)
        });

        let summary = summarize(&orders, &items);

        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.total_items, 7);
        assert_eq!(summary.unique_products, 3);
    }

    #[test]
    fn test_empty_inputs() {
        let rows = picking_rows(&[], &[]);
        assert!(rows.is_empty());

        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.unique_products, 0);
    }
}
