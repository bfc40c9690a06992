//! Shopping cart with derived pricing totals.
//!
//! The cart owns an ordered collection of lines plus an optional coupon and
//! shipping method. The derived totals (subtotal, discounted subtotal, tax,
//! shipping, total) are never mutated directly: every mutating operation
//! performs its state change and then runs the single recomputation routine.
//!
//! Pricing order is fixed: discount applies to the subtotal, tax applies to
//! the discounted subtotal, and the flat shipping fee is added last.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Default tax rate applied to the discounted subtotal (7%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// A single cart line for one product.
///
/// Invariant: `quantity >= 1` for as long as the line exists. An operation
/// that would take the quantity to zero removes the line instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to (unique within a cart).
    pub product_id: ProductId,
    /// Display name, captured from the catalog when the line was added.
    pub name: String,
    /// Unit price, captured from the catalog when the line was added.
    pub unit_price: Decimal,
    /// Product image reference, if any.
    pub image: Option<String>,
    /// Number of units; never below 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a cart line. A quantity below 1 is coerced to 1.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        image: Option<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            image,
            quantity: quantity.max(1),
        }
    }

    /// Extended price for this line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Error constructing a [`Coupon`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponError {
    /// Discount percent outside the 0..=100 range.
    #[error("discount percent must be between 0 and 100, got {0}")]
    DiscountOutOfRange(Decimal),
}

/// A percentage-off coupon.
///
/// The discount is validated at construction, so a coupon held by a cart is
/// always within 0..=100 and applying it can never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    code: String,
    discount_percent: Decimal,
}

impl Coupon {
    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::DiscountOutOfRange`] unless
    /// `0 <= discount_percent <= 100`.
    pub fn new(code: impl Into<String>, discount_percent: Decimal) -> Result<Self, CouponError> {
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            return Err(CouponError::DiscountOutOfRange(discount_percent));
        }
        Ok(Self {
            code: code.into(),
            discount_percent,
        })
    }

    /// The coupon code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The discount percentage (0..=100).
    #[must_use]
    pub const fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }
}

/// A shipping method with a flat per-order fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Stable identifier (e.g. `standard`, `express`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flat cost for the whole order, independent of item count.
    pub price: Decimal,
}

/// Derived cart totals.
///
/// Recomputed after every mutation; all fields are zero for an empty cart
/// with no shipping method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Sum of line totals before discounts.
    pub subtotal: Decimal,
    /// Subtotal after the coupon discount, if any.
    pub discounted_subtotal: Decimal,
    /// Tax on the discounted subtotal.
    pub tax: Decimal,
    /// Flat fee of the selected shipping method, or zero.
    pub shipping: Decimal,
    /// `discounted_subtotal + tax + shipping`.
    pub total: Decimal,
}

/// A shopping cart.
///
/// Lines keep insertion order (not significant to totals). The tax rate is
/// fixed at construction; recomputation never consults external state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    coupon: Option<Coupon>,
    shipping_method: Option<ShippingMethod>,
    tax_rate: Decimal,
    totals: Totals,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart with [`DEFAULT_TAX_RATE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_tax_rate(DEFAULT_TAX_RATE)
    }

    /// Create an empty cart with an explicit tax rate.
    #[must_use]
    pub fn with_tax_rate(tax_rate: Decimal) -> Self {
        Self {
            lines: Vec::new(),
            coupon: None,
            shipping_method: None,
            tax_rate,
            totals: Totals::default(),
        }
    }

    // =========================================================================
    // Mutations (each one ends in `recompute`)
    // =========================================================================

    /// Add a line to the cart.
    ///
    /// If a line for the same product already exists, its quantity is
    /// incremented by the new line's quantity; otherwise the line is appended.
    pub fn add_line(&mut self, line: CartLine) {
        let quantity = line.quantity.max(1);
        match self.line_mut(line.product_id) {
            Some(existing) => existing.quantity += quantity,
            None => self.lines.push(CartLine { quantity, ..line }),
        }
        self.recompute();
    }

    /// Remove the line for a product. Removing an absent line is a no-op.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
        self.recompute();
    }

    /// Set the quantity of a product's line.
    ///
    /// A quantity below 1 deletes the line; the quantity of an existing line
    /// never persists at zero. Targeting an absent product is a no-op.
    pub fn set_line_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove_line(product_id);
            return;
        }
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
        self.recompute();
    }

    /// Increase a product's quantity by one. No-op for an absent product.
    pub fn increment_line(&mut self, product_id: ProductId) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity += 1;
        }
        self.recompute();
    }

    /// Decrease a product's quantity by one.
    ///
    /// Decrementing a line at quantity 1 removes it, equivalent to
    /// [`Cart::remove_line`].
    pub fn decrement_line(&mut self, product_id: ProductId) {
        if let Some(line) = self.line_mut(product_id) {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                self.lines.retain(|line| line.product_id != product_id);
            }
        }
        self.recompute();
    }

    /// Apply a coupon, replacing any existing one.
    ///
    /// A 0% coupon is recorded but leaves the discounted subtotal unchanged.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.coupon = Some(coupon);
        self.recompute();
    }

    /// Clear the coupon.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
        self.recompute();
    }

    /// Select a shipping method, replacing any existing one.
    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = Some(method);
        self.recompute();
    }

    /// Clear the shipping method; the shipping total falls back to zero.
    pub fn clear_shipping_method(&mut self) {
        self.shipping_method = None;
        self.recompute();
    }

    /// Empty the cart: no lines, no coupon, no shipping method, zero totals.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupon = None;
        self.shipping_method = None;
        self.recompute();
    }

    /// The single recomputation routine.
    ///
    /// Order matters: discount before tax, tax before shipping.
    fn recompute(&mut self) {
        let subtotal: Decimal = self.lines.iter().map(CartLine::line_total).sum();

        let discounted_subtotal = self.coupon.as_ref().map_or(subtotal, |coupon| {
            subtotal * (Decimal::ONE - coupon.discount_percent() / Decimal::ONE_HUNDRED)
        });

        let tax = discounted_subtotal * self.tax_rate;

        let shipping = self
            .shipping_method
            .as_ref()
            .map_or(Decimal::ZERO, |method| method.price);

        self.totals = Totals {
            subtotal,
            discounted_subtotal,
            tax,
            shipping,
            total: discounted_subtotal + tax + shipping,
        };
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Whether the cart holds a line for this product.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current derived totals.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        self.totals
    }

    /// The applied coupon, if any.
    #[must_use]
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// The selected shipping method, if any.
    #[must_use]
    pub fn shipping_method(&self) -> Option<&ShippingMethod> {
        self.shipping_method.as_ref()
    }

    /// The tax rate this cart was created with.
    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dollars(units: i64, cents: i64) -> Decimal {
        Decimal::new(units * 100 + cents, 2)
    }

    /// Cart from the reference scenario: (p1, $10, qty 2), (p2, $5, qty 1).
    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(CartLine::new(
            ProductId::new(1),
            "Widget",
            dollars(10, 0),
            None,
            2,
        ));
        cart.add_line(CartLine::new(
            ProductId::new(2),
            "Gadget",
            dollars(5, 0),
            Some("gadget.png".to_owned()),
            1,
        ));
        cart
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.totals(), Totals::default());
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let cart = sample_cart();
        assert_eq!(cart.totals().subtotal, dollars(25, 0));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_reference_scenario_flat_shipping_and_tax() {
        let mut cart = sample_cart();
        cart.set_shipping_method(ShippingMethod {
            id: "flat".to_owned(),
            name: "Flat Rate".to_owned(),
            price: dollars(5, 0),
        });

        let totals = cart.totals();
        assert_eq!(totals.subtotal, dollars(25, 0));
        assert_eq!(totals.discounted_subtotal, dollars(25, 0));
        assert_eq!(totals.tax, dollars(1, 75));
        assert_eq!(totals.shipping, dollars(5, 0));
        assert_eq!(totals.total, dollars(31, 75));
    }

    #[test]
    fn test_reference_scenario_with_twenty_percent_coupon() {
        let mut cart = sample_cart();
        cart.set_shipping_method(ShippingMethod {
            id: "flat".to_owned(),
            name: "Flat Rate".to_owned(),
            price: dollars(5, 0),
        });
        cart.apply_coupon(Coupon::new("SAVE20", Decimal::from(20)).unwrap());

        let totals = cart.totals();
        assert_eq!(totals.subtotal, dollars(25, 0));
        assert_eq!(totals.discounted_subtotal, dollars(20, 0));
        assert_eq!(totals.tax, dollars(1, 40));
        assert_eq!(totals.total, dollars(26, 40));
    }

    #[test]
    fn test_increment_recomputes_subtotal() {
        let mut cart = sample_cart();
        cart.increment_line(ProductId::new(1));

        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 3);
        assert_eq!(cart.totals().subtotal, dollars(35, 0));
    }

    #[test]
    fn test_add_line_merges_by_product() {
        let mut cart = sample_cart();
        cart.add_line(CartLine::new(
            ProductId::new(1),
            "Widget",
            dollars(10, 0),
            None,
            4,
        ));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 6);
    }

    #[test]
    fn test_add_line_coerces_zero_quantity_to_one() {
        let mut cart = Cart::new();
        cart.add_line(CartLine::new(
            ProductId::new(9),
            "Trinket",
            dollars(1, 0),
            None,
            0,
        ));
        assert_eq!(cart.line(ProductId::new(9)).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let mut cart = sample_cart();
        cart.remove_line(ProductId::new(99));
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.totals().subtotal, dollars(25, 0));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = sample_cart();
        cart.set_line_quantity(ProductId::new(1), 0);

        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.totals().subtotal, dollars(5, 0));
    }

    #[test]
    fn test_decrement_at_one_equals_remove() {
        let mut decremented = sample_cart();
        decremented.decrement_line(ProductId::new(2));

        let mut removed = sample_cart();
        removed.remove_line(ProductId::new(2));

        assert_eq!(decremented, removed);
        assert!(!decremented.contains(ProductId::new(2)));
    }

    #[test]
    fn test_zero_percent_coupon_is_recorded_but_inert() {
        let mut cart = sample_cart();
        cart.apply_coupon(Coupon::new("NOOP", Decimal::ZERO).unwrap());

        assert!(cart.coupon().is_some());
        assert_eq!(cart.totals().discounted_subtotal, cart.totals().subtotal);
    }

    #[test]
    fn test_hundred_percent_coupon_leaves_only_shipping() {
        let mut cart = sample_cart();
        cart.set_shipping_method(ShippingMethod {
            id: "express".to_owned(),
            name: "Express".to_owned(),
            price: dollars(14, 99),
        });
        cart.apply_coupon(Coupon::new("FREE", Decimal::ONE_HUNDRED).unwrap());

        let totals = cart.totals();
        assert_eq!(totals.discounted_subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, totals.shipping);
    }

    #[test]
    fn test_apply_coupon_replaces_existing() {
        let mut cart = sample_cart();
        cart.apply_coupon(Coupon::new("SAVE10", Decimal::from(10)).unwrap());
        cart.apply_coupon(Coupon::new("SAVE20", Decimal::from(20)).unwrap());

        assert_eq!(cart.coupon().unwrap().code(), "SAVE20");
        assert_eq!(cart.totals().discounted_subtotal, dollars(20, 0));
    }

    #[test]
    fn test_remove_coupon_restores_subtotal() {
        let mut cart = sample_cart();
        cart.apply_coupon(Coupon::new("SAVE20", Decimal::from(20)).unwrap());
        cart.remove_coupon();

        assert!(cart.coupon().is_none());
        assert_eq!(cart.totals().discounted_subtotal, dollars(25, 0));
    }

    #[test]
    fn test_coupon_discount_out_of_range() {
        assert!(Coupon::new("TOO-MUCH", Decimal::from(101)).is_err());
        assert!(Coupon::new("NEGATIVE", Decimal::from(-1)).is_err());
        assert!(Coupon::new("MAX", Decimal::ONE_HUNDRED).is_ok());
    }

    #[test]
    fn test_shipping_is_flat_not_per_item() {
        let mut cart = sample_cart();
        cart.set_shipping_method(ShippingMethod {
            id: "standard".to_owned(),
            name: "Standard".to_owned(),
            price: dollars(5, 99),
        });
        let before = cart.totals().shipping;

        cart.increment_line(ProductId::new(1));
        assert_eq!(cart.totals().shipping, before);
    }

    #[test]
    fn test_clear_shipping_method_zeroes_shipping() {
        let mut cart = sample_cart();
        cart.set_shipping_method(ShippingMethod {
            id: "standard".to_owned(),
            name: "Standard".to_owned(),
            price: dollars(5, 99),
        });
        cart.clear_shipping_method();

        assert!(cart.shipping_method().is_none());
        assert_eq!(cart.totals().shipping, Decimal::ZERO);
        assert_eq!(
            cart.totals().total,
            cart.totals().discounted_subtotal + cart.totals().tax
        );
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = sample_cart();
        cart.apply_coupon(Coupon::new("SAVE20", Decimal::from(20)).unwrap());
        cart.set_shipping_method(ShippingMethod {
            id: "standard".to_owned(),
            name: "Standard".to_owned(),
            price: dollars(5, 99),
        });

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.coupon().is_none());
        assert!(cart.shipping_method().is_none());
        assert_eq!(cart.totals(), Totals::default());
    }

    #[test]
    fn test_custom_tax_rate() {
        let mut cart = Cart::with_tax_rate(Decimal::new(10, 2));
        cart.add_line(CartLine::new(
            ProductId::new(1),
            "Widget",
            dollars(10, 0),
            None,
            1,
        ));
        assert_eq!(cart.totals().tax, dollars(1, 0));
    }

    #[test]
    fn test_serde_roundtrip_preserves_totals() {
        let mut cart = sample_cart();
        cart.apply_coupon(Coupon::new("SAVE20", Decimal::from(20)).unwrap());

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
