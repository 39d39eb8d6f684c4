//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storedash_core::{OrderId, PaidOrder, Price, ProductId, StoreId};

/// A storefront order with its line items resolved to products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

/// One line item: a single unit of a product at its current price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Price,
}

impl Order {
    /// Sum of line prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|l| l.price).sum()
    }

    /// View of this order for revenue aggregation.
    #[must_use]
    pub fn to_paid_order(&self) -> PaidOrder {
        PaidOrder {
            created_at: self.created_at,
            is_paid: self.is_paid,
            item_prices: self.lines.iter().map(|l| l.price).collect(),
        }
    }
}
