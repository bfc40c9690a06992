//! Fixture-backed order store.

use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use shopsphere_core::cart::Cart;
use shopsphere_core::{Email, OrderId, OrderStatus, UserId};

use crate::fixtures::{FixtureError, load_fixture};
use crate::models::Order;

/// In-memory order store seeded from `orders.json`.
#[derive(Debug)]
pub struct OrderStore {
    orders: RwLock<Vec<Order>>,
}

impl OrderStore {
    /// Load the store from an `orders.json` fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let orders: Vec<Order> = load_fixture(path)?;
        Ok(Self::from_orders(orders))
    }

    /// Build a store from an in-memory order list.
    #[must_use]
    pub fn from_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    /// Place an order from a cart snapshot.
    ///
    /// The order captures the cart's lines, totals, and shipping method as
    /// they stand; the caller is responsible for clearing the cart afterwards.
    pub async fn place(&self, customer: Option<UserId>, email: Email, cart: &Cart) -> Order {
        let mut orders = self.orders.write().await;

        let next_id = orders
            .iter()
            .map(|order| order.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        let order = Order {
            id: OrderId::new(next_id),
            customer,
            email,
            lines: cart.lines().to_vec(),
            totals: cart.totals(),
            shipping_method: cart.shipping_method().cloned(),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
        };
        orders.push(order.clone());
        order
    }

    /// Look up an order by id.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// All orders, oldest first.
    pub async fn all(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Orders placed by a customer.
    pub async fn for_customer(&self, customer: UserId) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|order| order.customer == Some(customer))
            .cloned()
            .collect()
    }

    /// Update an order's status. Returns the updated order if found.
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Option<Order> {
        let mut orders = self.orders.write().await;
        let order = orders.iter_mut().find(|order| order.id == id)?;
        order.status = status;
        Some(order.clone())
    }

    /// Number of orders.
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Sum of order totals, excluding cancelled orders.
    pub async fn revenue(&self) -> Decimal {
        self.orders
            .read()
            .await
            .iter()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .map(|order| order.totals.total)
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopsphere_core::ProductId;
    use shopsphere_core::cart::CartLine;

    fn cart_with_line() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(CartLine::new(
            ProductId::new(1),
            "Widget",
            Decimal::new(1000, 2),
            None,
            2,
        ));
        cart
    }

    #[tokio::test]
    async fn test_place_snapshots_cart() {
        let store = OrderStore::from_orders(Vec::new());
        let cart = cart_with_line();

        let order = store
            .place(
                Some(UserId::new(3)),
                Email::parse("buyer@example.com").unwrap(),
                &cart,
            )
            .await;

        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.totals, cart.totals());
        assert_eq!(order.item_count(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = OrderStore::from_orders(Vec::new());
        let cart = cart_with_line();
        let email = Email::parse("buyer@example.com").unwrap();

        let first = store.place(None, email.clone(), &cart).await;
        let second = store.place(None, email, &cart).await;

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
    }

    #[tokio::test]
    async fn test_for_customer_filters() {
        let store = OrderStore::from_orders(Vec::new());
        let cart = cart_with_line();
        let email = Email::parse("buyer@example.com").unwrap();

        store.place(Some(UserId::new(1)), email.clone(), &cart).await;
        store.place(Some(UserId::new(2)), email.clone(), &cart).await;
        store.place(None, email, &cart).await;

        assert_eq!(store.for_customer(UserId::new(1)).await.len(), 1);
        assert_eq!(store.count().await, 3);
    }

    #[tokio::test]
    async fn test_revenue_excludes_cancelled() {
        let store = OrderStore::from_orders(Vec::new());
        let cart = cart_with_line();
        let email = Email::parse("buyer@example.com").unwrap();

        let kept = store.place(None, email.clone(), &cart).await;
        let cancelled = store.place(None, email, &cart).await;
        store
            .set_status(cancelled.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(store.revenue().await, kept.totals.total);
    }
}
