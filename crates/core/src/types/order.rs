//! Order domain types.
//!
//! These are the validated, closed shapes shared by the aggregator and the
//! export engine. They are created once during marketplace import and are
//! immutable afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{OrderId, OrderItemId};

/// Lifecycle status of an imported order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Imported but not yet picked.
    #[default]
    Pending,
    /// Paid on the marketplace.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Cancelled on the marketplace.
    Cancelled,
}

impl OrderStatus {
    /// Database/wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a status from its database/wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "shipped" => Some(Self::Shipped),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marketplace order imported into the local store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned unique ID.
    pub id: OrderId,
    /// Order ID on the marketplace (e.g., "ML-2024-001").
    pub external_order_id: String,
    /// Buyer's display name.
    pub buyer_name: String,
    /// Buyer's shipping address.
    pub buyer_address: String,
    /// Order total in the marketplace currency.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// When the order was imported.
    pub created_at: DateTime<Utc>,
}

/// A single line item belonging to an [`Order`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Store-assigned unique ID.
    pub id: OrderItemId,
    /// Parent order (foreign key).
    pub order_id: OrderId,
    /// Product title.
    pub product_name: String,
    /// Seller SKU.
    pub sku: String,
    /// Units to pick. Always positive.
    pub quantity: i32,
    /// Warehouse location (e.g., "Corredor A - Prateleira 3").
    pub storage_location: String,
    /// When the item was imported.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_order_status_parse_unknown() {
        assert_eq!(OrderStatus::parse("refunded"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }
}
