//! Monthly revenue aggregation for the dashboard graph.
//!
//! Paid orders are bucketed by the calendar month they were created in (UTC)
//! and each bucket holds the sum of the product prices of the order's line
//! items. The twelve buckets are then merged over a baseline so the graph
//! always has one point per month, January first.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Month, Price};

/// An order as seen by the revenue graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidOrder {
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Whether payment was captured. Unpaid orders never count.
    pub is_paid: bool,
    /// Price of the product referenced by each line item.
    pub item_prices: Vec<Price>,
}

impl PaidOrder {
    /// Revenue of this order: the sum of its line item prices.
    #[must_use]
    pub fn revenue(&self) -> Price {
        self.item_prices.iter().sum()
    }
}

/// One bar of the revenue graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPoint {
    /// Month label, e.g. `Jan`.
    pub name: String,
    /// Revenue for the month.
    pub total: Price,
}

/// Values shown for months without any paid orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphBaseline {
    /// Empty months show zero.
    #[default]
    Zero,
    /// Empty months show the fixed demo figures used for the public demo store.
    Demo,
}

impl GraphBaseline {
    /// Demo figures, January through December.
    const DEMO: [i64; 12] = [8, 10, 3, 43, 2, 0, 34, 0, 2, 2, 13, 0];

    /// Baseline value for a month.
    #[must_use]
    pub fn value(self, month: Month) -> Price {
        match self {
            Self::Zero => Price::ZERO,
            Self::Demo => Self::DEMO
                .get(month.index())
                .map_or(Price::ZERO, |dollars| Price::from_cents(dollars * 100)),
        }
    }
}

/// Build the twelve-point revenue graph.
///
/// Months with at least one paid order get the summed revenue of those
/// orders; all other months take the baseline value.
#[must_use]
pub fn graph_revenue<'a, I>(orders: I, baseline: GraphBaseline) -> Vec<GraphPoint>
where
    I: IntoIterator<Item = &'a PaidOrder>,
{
    let mut monthly: BTreeMap<Month, Price> = BTreeMap::new();

    for order in orders.into_iter().filter(|o| o.is_paid) {
        let bucket = monthly.entry(Month::of(&order.created_at)).or_default();
        *bucket = *bucket + order.revenue();
    }

    Month::ALL
        .iter()
        .map(|&month| GraphPoint {
            name: month.short_name().to_owned(),
            total: monthly
                .get(&month)
                .copied()
                .unwrap_or_else(|| baseline.value(month)),
        })
        .collect()
}

/// Total revenue across all paid orders.
#[must_use]
pub fn total_revenue<'a, I>(orders: I) -> Price
where
    I: IntoIterator<Item = &'a PaidOrder>,
{
    orders
        .into_iter()
        .filter(|o| o.is_paid)
        .map(PaidOrder::revenue)
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn order(month: u32, paid: bool, cents: &[i64]) -> PaidOrder {
        PaidOrder {
            created_at: Utc.with_ymd_and_hms(2026, month, 15, 12, 0, 0).unwrap(),
            is_paid: paid,
            item_prices: cents.iter().map(|&c| Price::from_cents(c)).collect(),
        }
    }

    #[test]
    fn test_graph_always_has_twelve_months_in_order() {
        let graph = graph_revenue(&[], GraphBaseline::Zero);
        let names: Vec<_> = graph.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert!(graph.iter().all(|p| p.total == Price::ZERO));
    }

    #[test]
    fn test_orders_in_same_month_accumulate() {
        let orders = [
            order(3, true, &[1_000, 2_550]),
            order(3, true, &[450]),
            order(7, true, &[9_999]),
        ];
        let graph = graph_revenue(&orders, GraphBaseline::Zero);

        assert_eq!(graph[2].total, Price::from_cents(4_000));
        assert_eq!(graph[6].total, Price::from_cents(9_999));
        assert_eq!(graph[0].total, Price::ZERO);
    }

    #[test]
    fn test_unpaid_orders_are_ignored() {
        let orders = [order(1, false, &[5_000]), order(1, true, &[100])];
        let graph = graph_revenue(&orders, GraphBaseline::Zero);
        assert_eq!(graph[0].total, Price::from_cents(100));
    }

    #[test]
    fn test_baseline_fills_only_empty_months() {
        let orders = [order(4, true, &[500])];
        let graph = graph_revenue(&orders, GraphBaseline::Demo);

        // April has real data and overrides the demo value of 43.
        assert_eq!(graph[3].total, Price::from_cents(500));
        // Other months keep the demo figures.
        assert_eq!(graph[0].total, Price::from_cents(800));
        assert_eq!(graph[6].total, Price::from_cents(3_400));
        assert_eq!(graph[11].total, Price::ZERO);
    }

    #[test]
    fn test_paid_order_with_no_items_still_claims_its_month() {
        let orders = [order(2, true, &[])];
        let graph = graph_revenue(&orders, GraphBaseline::Demo);
        assert_eq!(graph[1].total, Price::ZERO);
    }

    #[test]
    fn test_total_revenue() {
        let orders = [
            order(1, true, &[1_000]),
            order(5, true, &[250, 250]),
            order(6, false, &[10_000]),
        ];
        assert_eq!(total_revenue(&orders), Price::from_cents(1_500));
    }
}
