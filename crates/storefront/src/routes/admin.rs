//! Admin console route handlers (admin and superadmin roles).

use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopsphere_core::types::Money;
use shopsphere_core::{OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::routes::checkout::OrderView;
use crate::routes::products::ProductView;
use crate::settings::StoreSettings;
use crate::state::AppState;

/// Dashboard stats data.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub store_name: String,
    pub product_count: usize,
    pub user_count: usize,
    pub order_count: usize,
    pub pending_orders: usize,
    pub revenue: String,
}

/// Order status update form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Display store stats.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<DashboardView> {
    let orders = state.orders();
    let pending_orders = orders
        .all()
        .await
        .iter()
        .filter(|order| order.status == OrderStatus::Pending)
        .count();

    Json(DashboardView {
        store_name: state.settings().store_name.clone(),
        product_count: state.catalog().len(),
        user_count: state.users().count().await,
        order_count: orders.count().await,
        pending_orders,
        revenue: Money::new(orders.revenue().await, state.currency()).display(),
    })
}

/// List all products with stock levels.
pub async fn products(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<Vec<ProductView>> {
    let currency = state.currency();
    let products = state
        .catalog()
        .all()
        .iter()
        .map(|product| ProductView::build(product, currency))
        .collect();

    Json(products)
}

/// List all orders.
pub async fn orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<Vec<OrderView>> {
    let currency = state.currency();
    let orders = state
        .orders()
        .all()
        .await
        .iter()
        .map(|order| OrderView::build(order, currency))
        .collect();

    Json(orders)
}

/// Update an order's status.
#[instrument(skip(state, admin))]
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Result<Json<OrderView>> {
    let status: OrderStatus = form.status.parse().map_err(AppError::BadRequest)?;

    let order = state
        .orders()
        .set_status(OrderId::new(id), status)
        .await
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    tracing::info!(order_id = %order.id, %status, admin = %admin.email, "Order status updated");
    Ok(Json(OrderView::build(&order, state.currency())))
}

/// Display the store settings.
pub async fn settings(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<StoreSettings> {
    Json(state.settings().clone())
}
