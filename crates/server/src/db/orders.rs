//! Order and order-item repository.
//!
//! Orders and items are read as two independent sequences, both newest
//! first; the picking join happens in memory in `meli_picking_core`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use meli_picking_core::{Order, OrderId, OrderItem, OrderItemId, OrderStatus};

use super::RepositoryError;
use crate::meli::RawOrder;

/// Outcome of a batch import, reported back to the user.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportReport {
    /// Orders inserted.
    pub orders_imported: usize,
    /// Orders skipped because their insert failed.
    pub orders_skipped: usize,
    /// Items inserted.
    pub items_imported: usize,
    /// Items skipped (insert failure or invalid quantity).
    pub items_skipped: usize,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    external_order_id: String,
    buyer_name: String,
    buyer_address: String,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_name: String,
    sku: String,
    quantity: i32,
    storage_location: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, RepositoryError> {
        let status = OrderStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("unknown order status: {}", self.status))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            external_order_id: self.external_order_id,
            buyer_name: self.buyer_name,
            buyer_address: self.buyer_address,
            total_amount: self.total_amount,
            status,
            created_at: self.created_at,
        })
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_name: row.product_name,
            sku: row.sku,
            quantity: row.quantity,
            storage_location: row.storage_location,
            created_at: row.created_at,
        }
    }
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all imported orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is unknown.
    pub async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, external_order_id, buyer_name, buyer_address,
                   total_amount, status, created_at
            FROM orders
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// List all order items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_name, sku, quantity,
                   storage_location, created_at
            FROM order_items
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    /// Insert one order and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_order(
        &self,
        raw: &RawOrder,
        status: OrderStatus,
    ) -> Result<OrderId, RepositoryError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            r"
            INSERT INTO orders (external_order_id, buyer_name, buyer_address, total_amount, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&raw.external_order_id)
        .bind(&raw.buyer_name)
        .bind(&raw.buyer_address)
        .bind(raw.total_amount)
        .bind(status.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(OrderId::new(id))
    }

    /// Insert one order item bound to its parent order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_item(
        &self,
        order_id: OrderId,
        product_name: &str,
        sku: &str,
        quantity: i32,
        storage_location: &str,
    ) -> Result<OrderItemId, RepositoryError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            r"
            INSERT INTO order_items (order_id, product_name, sku, quantity, storage_location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(order_id)
        .bind(product_name)
        .bind(sku)
        .bind(quantity)
        .bind(storage_location)
        .fetch_one(self.pool)
        .await?;

        Ok(OrderItemId::new(id))
    }

    /// Import a batch of marketplace orders.
    ///
    /// Partial-failure tolerant, no transaction: an order insert failure
    /// skips that order's items and continues with the next order; an item
    /// insert failure (or a non-positive quantity) skips just that item.
    /// Failures are logged and counted in the returned report.
    pub async fn import_batch(&self, batch: &[RawOrder], status: OrderStatus) -> ImportReport {
        let mut report = ImportReport::default();

        for raw in batch {
            let order_id = match self.insert_order(raw, status).await {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(
                        external_order_id = %raw.external_order_id,
                        "Skipping order, insert failed: {e}"
                    );
                    report.orders_skipped += 1;
                    report.items_skipped += raw.items.len();
                    continue;
                }
            };
            report.orders_imported += 1;

            for item in &raw.items {
                if item.quantity <= 0 {
                    tracing::warn!(
                        external_order_id = %raw.external_order_id,
                        sku = %item.sku,
                        quantity = item.quantity,
                        "Skipping item with non-positive quantity"
                    );
                    report.items_skipped += 1;
                    continue;
                }

                match self
                    .insert_item(
                        order_id,
                        &item.product_name,
                        &item.sku,
                        item.quantity,
                        &item.storage_location,
                    )
                    .await
                {
                    Ok(_) => report.items_imported += 1,
                    Err(e) => {
                        tracing::warn!(
                            external_order_id = %raw.external_order_id,
                            sku = %item.sku,
                            "Skipping item, insert failed: {e}"
                        );
                        report.items_skipped += 1;
                    }
                }
            }
        }

        report
    }
}
