//! Store overview: revenue, sales, stock and the monthly revenue graph.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tower_sessions::Session;
use tracing::instrument;

use storedash_core::GraphPoint;

use super::{Shell, StorePage};
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireUser;
use crate::services::{AnalyticsService, Overview};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/{store_id}", get(overview))
}

/// One bar of the revenue graph.
#[derive(Debug, Clone)]
pub struct GraphBar {
    pub name: String,
    pub total: String,
    /// Bar height as a percentage of the tallest month.
    pub height: u32,
}

/// Scale the graph so the tallest month fills the chart.
fn graph_bars(graph: &[GraphPoint]) -> Vec<GraphBar> {
    let max = graph
        .iter()
        .map(|point| point.total.amount())
        .max()
        .unwrap_or(Decimal::ZERO);

    graph
        .iter()
        .map(|point| {
            let height = if max > Decimal::ZERO {
                (point.total.amount() * Decimal::ONE_HUNDRED / max)
                    .round()
                    .to_u32()
                    .unwrap_or(0)
            } else {
                0
            };
            GraphBar {
                name: point.name.clone(),
                total: point.total.to_string(),
                height,
            }
        })
        .collect()
}

/// Overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub shell: Shell,
    pub total_revenue: String,
    pub sales_count: i64,
    pub stock_count: i64,
    pub bars: Vec<GraphBar>,
}

/// GET / - send the user to a store, or to create their first one.
#[instrument(skip(state, user))]
async fn home(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Redirect, AppError> {
    let store = StoreRepository::new(state.pool())
        .first_for_user(user.id)
        .await?;

    Ok(match store {
        Some(store) => Redirect::to(&format!("/{}", store.id)),
        None => Redirect::to("/stores/new"),
    })
}

#[instrument(skip(state, session, user))]
async fn overview(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "").await?;

    let Overview {
        total_revenue,
        sales_count,
        stock_count,
        graph,
    } = AnalyticsService::new(state.pool(), state.config().graph_baseline)
        .overview(page.store_id())
        .await?;

    Ok(OverviewTemplate {
        shell: page.shell,
        total_revenue: total_revenue.to_string(),
        sales_count,
        stock_count,
        bars: graph_bars(&graph),
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use storedash_core::Price;

    use super::*;

    fn point(name: &str, cents: i64) -> GraphPoint {
        GraphPoint {
            name: name.to_owned(),
            total: Price::from_cents(cents),
        }
    }

    #[test]
    fn test_bars_scale_to_tallest_month() {
        let bars = graph_bars(&[point("Jan", 5_000), point("Feb", 20_000), point("Mar", 0)]);

        let heights: Vec<_> = bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, [25, 100, 0]);
        assert_eq!(bars[1].total, "$200.00");
    }

    #[test]
    fn test_bars_without_revenue_are_flat() {
        let bars = graph_bars(&[point("Jan", 0), point("Feb", 0)]);
        assert!(bars.iter().all(|b| b.height == 0));
    }
}
