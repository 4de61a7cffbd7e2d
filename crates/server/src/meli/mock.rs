//! Fixed demo batch used when `MELI_DEMO_MODE` is enabled.
//!
//! Lets the picking flow be exercised end to end without marketplace
//! credentials: 5 orders, 10 line items, 17 units in total.

use rust_decimal::Decimal;

use crate::meli::types::{RawOrder, RawOrderItem};

/// Build the demo order batch.
#[must_use]
pub fn demo_orders() -> Vec<RawOrder> {
    vec![
        RawOrder {
            external_order_id: "ML-2024-001".to_string(),
            buyer_name: "João Silva".to_string(),
            buyer_address: "Rua das Flores, 123 - São Paulo, SP".to_string(),
            total_amount: Decimal::new(29_990, 2),
            items: vec![
                item("Tênis Esportivo Nike", "NIKE-001", 2, "Corredor A - Prateleira 3"),
                item("Meia Esportiva", "SOCK-001", 4, "Corredor B - Prateleira 1"),
            ],
        },
        RawOrder {
            external_order_id: "ML-2024-002".to_string(),
            buyer_name: "Maria Santos".to_string(),
            buyer_address: "Av. Paulista, 1000 - São Paulo, SP".to_string(),
            total_amount: Decimal::new(45_000, 2),
            items: vec![
                item("Camisa Polo Lacoste", "LAC-001", 1, "Corredor C - Prateleira 2"),
                item("Calça Jeans Levi's", "LEVIS-001", 3, "Corredor A - Prateleira 5"),
            ],
        },
        RawOrder {
            external_order_id: "ML-2024-003".to_string(),
            buyer_name: "Pedro Costa".to_string(),
            buyer_address: "Rua Augusta, 500 - São Paulo, SP".to_string(),
            total_amount: Decimal::new(19_990, 2),
            items: vec![
                item("Boné Adidas", "ADI-CAP-001", 1, "Corredor D - Prateleira 1"),
                item("Óculos de Sol Ray-Ban", "RAY-001", 1, "Corredor B - Prateleira 4"),
            ],
        },
        RawOrder {
            external_order_id: "ML-2024-004".to_string(),
            buyer_name: "Ana Oliveira".to_string(),
            buyer_address: "Rua Oscar Freire, 789 - São Paulo, SP".to_string(),
            total_amount: Decimal::new(85_000, 2),
            items: vec![
                item("Jaqueta de Couro", "JACKET-001", 1, "Corredor E - Prateleira 2"),
                item("Bota Masculina", "BOOT-001", 1, "Corredor A - Prateleira 7"),
            ],
        },
        RawOrder {
            external_order_id: "ML-2024-005".to_string(),
            buyer_name: "Carlos Mendes".to_string(),
            buyer_address: "Av. Faria Lima, 2000 - São Paulo, SP".to_string(),
            total_amount: Decimal::new(32_000, 2),
            items: vec![
                item("Relógio Casio", "CASIO-001", 1, "Corredor F - Prateleira 3"),
                item("Carteira de Couro", "WALLET-001", 2, "Corredor C - Prateleira 1"),
            ],
        },
    ]
}

fn item(product_name: &str, sku: &str, quantity: i32, storage_location: &str) -> RawOrderItem {
    RawOrderItem {
        product_name: product_name.to_string(),
        sku: sku.to_string(),
        quantity,
        storage_location: storage_location.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_batch_shape() {
        let orders = demo_orders();

        assert_eq!(orders.len(), 5);

        let items: Vec<_> = orders.iter().flat_map(|o| o.items.iter()).collect();
        assert_eq!(items.len(), 10);

        let total_units: i32 = items.iter().map(|i| i.quantity).sum();
        assert_eq!(total_units, 17);
    }

    #[test]
    fn test_demo_batch_items_are_valid() {
        for order in demo_orders() {
            assert!(!order.external_order_id.is_empty());
            for item in &order.items {
                assert!(item.quantity > 0);
                assert!(!item.sku.is_empty());
                assert!(!item.storage_location.is_empty());
            }
        }
    }
}
