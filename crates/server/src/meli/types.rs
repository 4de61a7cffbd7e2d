//! Wire types for the Mercado Livre REST API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Token endpoint response.
///
/// Only `access_token` is required; Mercado Livre also returns scope and
/// expiry metadata that this application does not track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer credential for subsequent API calls.
    pub access_token: String,
}

/// The authenticated seller, from `GET /users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeliUser {
    /// Seller's numeric ID.
    pub id: i64,
    /// Seller's nickname.
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Response envelope for `GET /orders/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSearchResponse {
    /// Matching orders.
    pub results: Vec<SearchOrder>,
}

/// An order as returned by the order search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchOrder {
    /// Marketplace order ID.
    pub id: i64,
    /// Line items.
    #[serde(default)]
    pub order_items: Vec<SearchOrderItem>,
    /// Order total.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Buyer information.
    #[serde(default)]
    pub buyer: Option<SearchBuyer>,
    /// Shipping information.
    #[serde(default)]
    pub shipping: Option<SearchShipping>,
}

/// A line item inside a search result order.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchOrderItem {
    /// The listed item.
    pub item: SearchItem,
    /// Units sold.
    pub quantity: i32,
}

/// Listing data inside a line item.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// Listing ID (e.g., "MLB123456789").
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Seller-assigned SKU, when set on the listing.
    #[serde(default)]
    pub seller_sku: Option<String>,
}

/// Buyer data inside a search result order.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBuyer {
    /// Buyer's nickname.
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Shipping data inside a search result order.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchShipping {
    /// Destination address.
    #[serde(default)]
    pub receiver_address: Option<SearchAddress>,
}

/// Receiver address inside shipping data.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchAddress {
    /// Single-line address.
    #[serde(default)]
    pub address_line: Option<String>,
}

/// A marketplace order normalized for import into the record store.
///
/// This is the closed, validated shape the import batch consumes, whether
/// the data came from the live API or the demo fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrder {
    /// Marketplace order ID.
    pub external_order_id: String,
    /// Buyer's display name.
    pub buyer_name: String,
    /// Buyer's shipping address.
    pub buyer_address: String,
    /// Order total.
    pub total_amount: Decimal,
    /// Line items.
    pub items: Vec<RawOrderItem>,
}

/// A normalized line item for import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrderItem {
    /// Product title.
    pub product_name: String,
    /// Seller SKU.
    pub sku: String,
    /// Units sold. Non-positive values are rejected at import.
    pub quantity: i32,
    /// Warehouse location, when known.
    pub storage_location: String,
}

/// Placeholder used when the marketplace does not supply a field.
const UNKNOWN: &str = "N/A";

impl From<SearchOrder> for RawOrder {
    fn from(order: SearchOrder) -> Self {
        Self {
            external_order_id: order.id.to_string(),
            buyer_name: order
                .buyer
                .and_then(|b| b.nickname)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            buyer_address: order
                .shipping
                .and_then(|s| s.receiver_address)
                .and_then(|a| a.address_line)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            total_amount: order.total_amount.unwrap_or_default(),
            items: order
                .order_items
                .into_iter()
                .map(|line| RawOrderItem {
                    sku: line.item.seller_sku.unwrap_or_else(|| line.item.id.clone()),
                    product_name: line.item.title,
                    quantity: line.quantity,
                    // The marketplace knows nothing about the seller's warehouse
                    storage_location: UNKNOWN.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_search_order_normalization() {
        let json = serde_json::json!({
            "id": 2000001,
            "total_amount": "299.90",
            "buyer": { "nickname": "JOAOSILVA" },
            "shipping": { "receiver_address": { "address_line": "Rua das Flores, 123" } },
            "order_items": [
                { "item": { "id": "MLB1", "title": "Tênis Esportivo Nike", "seller_sku": "NIKE-001" }, "quantity": 2 },
                { "item": { "id": "MLB2", "title": "Meia Esportiva" }, "quantity": 3 }
            ]
        });

        let order: SearchOrder = serde_json::from_value(json).unwrap();
        let raw = RawOrder::from(order);

        assert_eq!(raw.external_order_id, "2000001");
        assert_eq!(raw.buyer_name, "JOAOSILVA");
        assert_eq!(raw.buyer_address, "Rua das Flores, 123");
        assert_eq!(raw.items.len(), 2);
        assert_eq!(raw.items[0].sku, "NIKE-001");
        // Missing seller_sku falls back to the listing ID
        assert_eq!(raw.items[1].sku, "MLB2");
        assert_eq!(raw.items[1].storage_location, "N/A");
    }

    #[test]
    fn test_search_order_missing_optionals() {
        let json = serde_json::json!({ "id": 42 });
        let order: SearchOrder = serde_json::from_value(json).unwrap();
        let raw = RawOrder::from(order);

        assert_eq!(raw.external_order_id, "42");
        assert_eq!(raw.buyer_name, "N/A");
        assert_eq!(raw.buyer_address, "N/A");
        assert!(raw.items.is_empty());
    }
}
