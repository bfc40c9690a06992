//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopsphere_core::cart::{CartLine, ShippingMethod, Totals};
use shopsphere_core::{Email, OrderId, OrderStatus, UserId};

/// A placed order.
///
/// Lines and totals are a snapshot taken at checkout; later catalog or
/// settings changes never reprice an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The customer, when the order was placed by a logged-in user.
    pub customer: Option<UserId>,
    /// Contact email (the customer's, or the one given at guest checkout).
    pub email: Email,
    /// Snapshot of the cart lines.
    pub lines: Vec<CartLine>,
    /// Snapshot of the derived totals.
    pub totals: Totals,
    /// Shipping method selected at checkout, if any.
    pub shipping_method: Option<ShippingMethod>,
    /// Fulfillment status.
    #[serde(default)]
    pub status: OrderStatus,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units in the order.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
