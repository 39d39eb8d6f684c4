//! Orders table.

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use super::{EntityIndexTemplate, StorePage};
use crate::components::{DataTableConfig, TableCell, TableColumn, TableRow};
use crate::db::OrderRepository;
use crate::error::AppError;
use crate::filters::long_date;
use crate::middleware::RequireUser;
use crate::models::Order;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{store_id}/orders", get(index))
}

fn table_row(order: &Order) -> TableRow {
    let products = order
        .lines
        .iter()
        .map(|line| line.product_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    TableRow::new(vec![
        TableCell::text(products),
        TableCell::text(&order.phone),
        TableCell::text(&order.address),
        TableCell::text(order.total().to_string()),
        TableCell::flag(order.is_paid),
        TableCell::text(long_date(&order.created_at)),
    ])
}

#[instrument(skip(state, session, user))]
async fn index(
    State(state): State<AppState>,
    Path(store): Path<String>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    let page = StorePage::load(&state, &session, &user, &store, "orders").await?;
    let orders = OrderRepository::new(state.pool())
        .list(page.store_id())
        .await?;

    let table = DataTableConfig::new("orders")
        .column(TableColumn::new("products", "Products"))
        .column(TableColumn::new("phone", "Phone"))
        .column(TableColumn::new("address", "Address"))
        .column(TableColumn::new("totalPrice", "Total price"))
        .column(TableColumn::new("isPaid", "Paid"))
        .column(TableColumn::new("date", "Date"))
        .rows(orders.iter().map(table_row).collect())
        .search_placeholder("Search by product...")
        .empty_state("No orders yet", Some("Orders placed in the storefront show up here."));

    Ok(EntityIndexTemplate {
        title: format!("Orders ({})", orders.len()),
        description: "Manage orders for your store".to_owned(),
        new_href: String::new(),
        table,
        api_routes: vec![],
        shell: page.shell,
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use storedash_core::{OrderId, Price, ProductId, StoreId};

    use super::*;
    use crate::models::OrderLine;

    #[test]
    fn test_row_lists_products_and_total() {
        let order = Order {
            id: OrderId::generate(),
            store_id: StoreId::generate(),
            is_paid: true,
            phone: "555-0100".to_owned(),
            address: "1 Main St".to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap(),
            lines: vec![
                OrderLine {
                    product_id: ProductId::generate(),
                    product_name: "Jersey".to_owned(),
                    price: Price::from_cents(4_500),
                },
                OrderLine {
                    product_id: ProductId::generate(),
                    product_name: "Cap".to_owned(),
                    price: Price::from_cents(1_250),
                },
            ],
        };

        let row = table_row(&order);
        let texts: Vec<_> = row.cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Jersey, Cap", "555-0100", "1 Main St", "$57.50", "Yes", "March 2nd, 2026"]
        );
        assert!(row.edit_href.is_none());
    }
}
