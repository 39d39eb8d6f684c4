//! Order repository.
//!
//! Orders are written by the storefront checkout (or `sd-cli seed`); the
//! dashboard only reads them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storedash_core::{OrderId, PaidOrder, Price, ProductId, StoreId};

use super::RepositoryError;
use crate::models::{Order, OrderLine};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    store_id: StoreId,
    is_paid: bool,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    order_id: OrderId,
    product_id: ProductId,
    product_name: String,
    price: Price,
}

/// A new order as created by the seeder.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub product_ids: Vec<ProductId>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All orders of a store, newest first, with their lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Order>, RepositoryError> {
        self.load(store_id, false).await
    }

    /// Paid orders of a store in the shape the revenue graph consumes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn paid_orders(&self, store_id: StoreId) -> Result<Vec<PaidOrder>, RepositoryError> {
        let orders = self.load(store_id, true).await?;
        Ok(orders.iter().map(Order::to_paid_order).collect())
    }

    /// Number of paid orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sales_count(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM dashboard.orders WHERE store_id = $1 AND is_paid",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    async fn load(&self, store_id: StoreId, paid_only: bool) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, store_id, is_paid, phone, address, created_at
            FROM dashboard.orders
            WHERE store_id = $1 AND ($2 = false OR is_paid)
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .bind(paid_only)
        .fetch_all(self.pool)
        .await?;

        let lines = sqlx::query_as::<_, LineRow>(
            r"
            SELECT oi.order_id, oi.product_id, p.name_en AS product_name, p.price
            FROM dashboard.order_items oi
            JOIN dashboard.orders o ON o.id = oi.order_id
            JOIN dashboard.products p ON p.id = oi.product_id
            WHERE o.store_id = $1 AND ($2 = false OR o.is_paid)
            ORDER BY oi.created_at
            ",
        )
        .bind(store_id)
        .bind(paid_only)
        .fetch_all(self.pool)
        .await?;

        let mut lines_by_order: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
        for line in lines {
            lines_by_order
                .entry(line.order_id)
                .or_default()
                .push(OrderLine {
                    product_id: line.product_id,
                    product_name: line.product_name,
                    price: line.price,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| Order {
                lines: lines_by_order.remove(&row.id).unwrap_or_default(),
                id: row.id,
                store_id: row.store_id,
                is_paid: row.is_paid,
                phone: row.phone,
                address: row.address,
                created_at: row.created_at,
            })
            .collect())
    }

    /// Insert an order with one line per product ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a product does not exist.
    pub async fn create(
        &self,
        store_id: StoreId,
        order: &NewOrder,
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id: OrderId = sqlx::query_scalar(
            r"
            INSERT INTO dashboard.orders (store_id, is_paid, phone, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id
            ",
        )
        .bind(store_id)
        .bind(order.is_paid)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(order.created_at)
        .fetch_one(&mut *tx)
        .await?;

        let product_ids: Vec<_> = order.product_ids.iter().map(ProductId::as_uuid).collect();
        sqlx::query(
            r"
            INSERT INTO dashboard.order_items (order_id, product_id)
            SELECT $1, product_id FROM UNNEST($2::uuid[]) AS t(product_id)
            ",
        )
        .bind(id)
        .bind(&product_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }
}
