//! Cart route handlers.
//!
//! The cart lives in the session. Every mutating handler follows the same
//! shape: load the cart, call exactly one cart operation (which recomputes
//! the derived totals), write the cart back, and return the fresh view.

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shopsphere_core::ProductId;
use shopsphere_core::cart::{Cart, CartLine};
use shopsphere_core::types::{CurrencyCode, Money};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, or a fresh one with the store tax rate.
pub(crate) async fn load_cart(session: &Session, state: &AppState) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| state.new_cart())
}

/// Write the cart back to the session.
pub(crate) async fn store_cart(
    session: &Session,
    cart: &Cart,
) -> std::result::Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Views
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image: Option<String>,
}

/// Derived totals display data.
#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub subtotal: String,
    pub discounted_subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
}

/// Applied coupon display data.
#[derive(Debug, Clone, Serialize)]
pub struct CouponView {
    pub code: String,
    pub discount_percent: String,
}

/// Selected shipping method display data.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingMethodView {
    pub id: String,
    pub name: String,
    pub price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub coupon: Option<CouponView>,
    pub shipping_method: Option<ShippingMethodView>,
    pub totals: TotalsView,
}

impl CartView {
    /// Build the display view from a cart.
    #[must_use]
    pub fn build(cart: &Cart, currency: CurrencyCode) -> Self {
        let price = |amount| Money::new(amount, currency).display();
        let totals = cart.totals();

        Self {
            items: cart
                .lines()
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
            item_count: cart.item_count(),
            coupon: cart.coupon().map(|coupon| CouponView {
                code: coupon.code().to_owned(),
                discount_percent: format!("{}", coupon.discount_percent()),
            }),
            shipping_method: cart.shipping_method().map(|method| ShippingMethodView {
                id: method.id.clone(),
                name: method.name.clone(),
                price: price(method.price),
            }),
            totals: TotalsView {
                subtotal: price(totals.subtotal),
                discounted_subtotal: price(totals.discounted_subtotal),
                tax: price(totals.tax),
                shipping: price(totals.shipping),
                total: price(totals.total),
            },
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: Option<u32>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: u32,
}

/// Single-line form data (increment, decrement, remove).
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub product_id: i64,
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    pub code: String,
}

/// Shipping method form data.
#[derive(Debug, Deserialize)]
pub struct ShippingForm {
    pub method: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CartView> {
    let cart = load_cart(&session, &state).await;
    Json(CartView::build(&cart, state.currency()))
}

/// Add a product to the cart.
///
/// The catalog supplies the price, name, and image; an existing line for the
/// same product has its quantity incremented instead of a duplicate line
/// being appended.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let mut cart = load_cart(&session, &state).await;
    cart.add_line(CartLine::new(
        product.id,
        &product.name,
        product.price,
        product.image.clone(),
        form.quantity.unwrap_or(1),
    ));
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Set a line's quantity. Quantity 0 deletes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await;
    cart.set_line_quantity(ProductId::new(form.product_id), form.quantity);
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Increase a line's quantity by one.
#[instrument(skip(state, session))]
pub async fn increment(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LineForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await;
    cart.increment_line(ProductId::new(form.product_id));
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Decrease a line's quantity by one; a line at quantity 1 is removed.
#[instrument(skip(state, session))]
pub async fn decrement(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LineForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await;
    cart.decrement_line(ProductId::new(form.product_id));
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Remove a line. Removing an absent line is a no-op, not an error.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LineForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await;
    cart.remove_line(ProductId::new(form.product_id));
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Empty the cart entirely.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await;
    cart.clear();
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Apply a coupon code from the store's coupon table.
#[instrument(skip(state, session))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CouponForm>,
) -> Result<Json<CartView>> {
    let coupon = state
        .settings()
        .coupon(&form.code)
        .ok_or_else(|| AppError::NotFound(format!("coupon {}", form.code)))?;

    let mut cart = load_cart(&session, &state).await;
    cart.apply_coupon(coupon);
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Remove the applied coupon.
#[instrument(skip(state, session))]
pub async fn remove_coupon(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session, &state).await;
    cart.remove_coupon();
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Select a shipping method from the store's method table.
#[instrument(skip(state, session))]
pub async fn set_shipping(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ShippingForm>,
) -> Result<Json<CartView>> {
    let method = state
        .settings()
        .shipping_method(&form.method)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("shipping method {}", form.method)))?;

    let mut cart = load_cart(&session, &state).await;
    cart.set_shipping_method(method);
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&cart, state.currency())))
}

/// Get the cart count badge.
pub async fn count(State(state): State<AppState>, session: Session) -> Json<CartCountView> {
    let cart = load_cart(&session, &state).await;
    Json(CartCountView {
        count: cart.item_count(),
    })
}
