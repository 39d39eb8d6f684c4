//! Dashboard overview figures for one store.

use sqlx::PgPool;

use storedash_core::{GraphBaseline, GraphPoint, Price, StoreId, graph_revenue, total_revenue};

use crate::db::{OrderRepository, ProductRepository, RepositoryError};

/// Figures shown on the store overview page.
#[derive(Debug, Clone)]
pub struct Overview {
    /// Sum of all paid orders.
    pub total_revenue: Price,
    /// Number of paid orders.
    pub sales_count: i64,
    /// Number of products not archived.
    pub stock_count: i64,
    /// Revenue per month, January through December.
    pub graph: Vec<GraphPoint>,
}

/// Read-only analytics over orders and products.
pub struct AnalyticsService<'a> {
    orders: OrderRepository<'a>,
    products: ProductRepository<'a>,
    baseline: GraphBaseline,
}

impl<'a> AnalyticsService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, baseline: GraphBaseline) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            products: ProductRepository::new(pool),
            baseline,
        }
    }

    /// Number of paid orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn sales_count(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        self.orders.sales_count(store_id).await
    }

    /// Number of products in stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn stock_count(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        self.products.stock_count(store_id).await
    }

    /// Everything the overview page shows, loading paid orders once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any query fails.
    pub async fn overview(&self, store_id: StoreId) -> Result<Overview, RepositoryError> {
        let (orders, sales_count, stock_count) = tokio::try_join!(
            self.orders.paid_orders(store_id),
            self.sales_count(store_id),
            self.stock_count(store_id),
        )?;

        Ok(Overview {
            total_revenue: total_revenue(&orders),
            sales_count,
            stock_count,
            graph: graph_revenue(&orders, self.baseline),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[tokio::test]
    async fn test_overview_reports_database_errors() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://storedash@127.0.0.1:1/storedash")
            .unwrap();

        let result = AnalyticsService::new(&pool, GraphBaseline::Zero)
            .overview(StoreId::new(uuid::Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
