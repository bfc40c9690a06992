//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (session store)
//!
//! # Products
//! GET  /products               - Product listing (?category=, ?featured=)
//! GET  /products/{id}          - Product detail
//! GET  /categories/{category}  - Products in a category
//!
//! # Cart
//! GET  /cart                   - Cart with derived totals
//! POST /cart/add               - Add product (merges into existing line)
//! POST /cart/update            - Set line quantity (0 deletes the line)
//! POST /cart/increment         - Increase line quantity by one
//! POST /cart/decrement         - Decrease line quantity by one (1 -> removed)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! POST /cart/coupon            - Apply a coupon code
//! DELETE /cart/coupon          - Remove the coupon
//! POST /cart/shipping          - Select a shipping method
//! GET  /cart/count             - Item count badge
//!
//! # Checkout
//! POST /checkout               - Place an order from the cart
//!
//! # Auth
//! GET  /auth/login             - Login prompt (gate redirect target)
//! POST /auth/login             - Login action
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires authentication)
//! GET  /account                - Account overview
//! GET  /account/orders         - Order history
//! POST /account/profile        - Update profile fields (never the role)
//!
//! # Admin console (admin, superadmin)
//! GET  /admin/dashboard        - Store stats
//! GET  /admin/products         - Product list with stock
//! GET  /admin/orders           - All orders
//! POST /admin/orders/{id}/status - Update order status
//! GET  /admin/settings         - Store settings
//!
//! # Superadmin console (superadmin only)
//! GET  /superadmin/users       - User list
//! POST /superadmin/users/{id}/role   - Change a user's role
//! POST /superadmin/users/{id}/delete - Delete a user
//! GET  /superadmin/orders      - All orders across the store
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod superadmin;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/coupon", post(cart::apply_coupon).delete(cart::remove_coupon))
        .route("/shipping", post(cart::set_shipping))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders))
        .route("/profile", post(account::update_profile))
}

/// Create the admin console router (gated by `RequireAdmin` extractors).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/products", get(admin::products))
        .route("/orders", get(admin::orders))
        .route("/orders/{id}/status", post(admin::update_order_status))
        .route("/settings", get(admin::settings))
}

/// Create the superadmin console router (gated by `RequireSuperAdmin`).
pub fn superadmin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(superadmin::users))
        .route("/users/{id}/role", post(superadmin::update_user_role))
        .route("/users/{id}/delete", post(superadmin::delete_user))
        .route("/orders", get(superadmin::orders))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Category browsing
        .route("/categories/{category}", get(products::by_category))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(checkout::checkout))
        // Auth routes
        .nest("/auth", auth_routes())
        // Account routes
        .nest("/account", account_routes())
        // Role-gated consoles
        .nest("/admin", admin_routes())
        .nest("/superadmin", superadmin_routes())
}
