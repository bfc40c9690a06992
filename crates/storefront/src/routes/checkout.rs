//! Checkout route handler.
//!
//! Checkout snapshots the cart into an order and clears the cart. There is
//! no payment step: the order is recorded as pending and returned.

use axum::{Form, Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shopsphere_core::types::{CurrencyCode, Money};
use shopsphere_core::{Email, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::CurrentPrincipal;
use crate::models::Order;
use crate::routes::cart::{CartItemView, load_cart, store_cart};
use crate::state::AppState;

/// Checkout form data.
///
/// The email is required for guest checkout; logged-in customers default to
/// their account email.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub email: Option<String>,
}

/// Order display data.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub email: String,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub item_count: u32,
    pub items: Vec<CartItemView>,
    pub shipping_method: Option<String>,
    pub subtotal: String,
    pub discounted_subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
}

impl OrderView {
    /// Build the display view from an order.
    #[must_use]
    pub fn build(order: &Order, currency: CurrencyCode) -> Self {
        let price = |amount| Money::new(amount, currency).display();

        Self {
            id: order.id,
            email: order.email.to_string(),
            status: order.status,
            placed_at: order.placed_at,
            item_count: order.item_count(),
            items: order
                .lines
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: price(line.unit_price),
                    line_total: price(line.line_total()),
                    image: line.image.clone(),
                })
                .collect(),
            shipping_method: order
                .shipping_method
                .as_ref()
                .map(|method| method.name.clone()),
            subtotal: price(order.totals.subtotal),
            discounted_subtotal: price(order.totals.discounted_subtotal),
            tax: price(order.totals.tax),
            shipping: price(order.totals.shipping),
            total: price(order.totals.total),
        }
    }
}

/// Place an order from the current cart.
#[instrument(skip(state, session, principal))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    principal: CurrentPrincipal,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<OrderView>> {
    let mut cart = load_cart(&session, &state).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    // Logged-in customers order under their account email; guests must
    // supply one on the form.
    let (customer, email) = match principal.0 {
        Some(user) => (Some(user.id), user.email),
        None => {
            let raw = form
                .email
                .ok_or_else(|| AppError::BadRequest("email is required".to_owned()))?;
            let email = Email::parse(&raw)
                .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
            (None, email)
        }
    };

    let order = state.orders().place(customer, email, &cart).await;
    tracing::info!(order_id = %order.id, total = %order.totals.total, "Order placed");

    cart.clear();
    store_cart(&session, &cart).await?;

    Ok(Json(OrderView::build(&order, state.currency())))
}
