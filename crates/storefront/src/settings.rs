//! Store-wide settings backed by the `settings.json` fixture.
//!
//! Settings supply the pieces of cart pricing that are configuration rather
//! than cart state: the tax rate, the shipping method table, and the coupon
//! table the storefront resolves codes against.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopsphere_core::cart::{Coupon, CouponError, DEFAULT_TAX_RATE, ShippingMethod};
use shopsphere_core::types::CurrencyCode;

use crate::fixtures::{FixtureError, load_fixture};

/// A coupon table entry as stored in the fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponDef {
    /// Code customers enter (matched case-insensitively).
    pub code: String,
    /// Percentage off the subtotal, 0..=100.
    pub discount_percent: Decimal,
}

/// Errors loading or validating store settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The fixture file could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// A coupon table entry has an out-of-range discount.
    #[error("invalid coupon {code:?}: {source}")]
    InvalidCoupon {
        code: String,
        #[source]
        source: CouponError,
    },
}

/// Store-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store display name.
    pub store_name: String,
    /// Currency used for all prices.
    #[serde(default)]
    pub currency: CurrencyCode,
    /// Tax rate applied to the discounted subtotal (e.g. 0.07 for 7%).
    pub tax_rate: Decimal,
    /// Available shipping methods with flat fees.
    pub shipping_methods: Vec<ShippingMethod>,
    /// Redeemable coupons.
    #[serde(default)]
    pub coupons: Vec<CouponDef>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "ShopSphere".to_owned(),
            currency: CurrencyCode::USD,
            tax_rate: DEFAULT_TAX_RATE,
            shipping_methods: Vec::new(),
            coupons: Vec::new(),
        }
    }
}

impl StoreSettings {
    /// Load settings from a `settings.json` fixture.
    ///
    /// The coupon table is validated eagerly so a bad fixture fails at
    /// startup instead of silently never applying a discount.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file is missing/malformed or a
    /// coupon discount is outside 0..=100.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings: Self = load_fixture(path)?;

        for def in &settings.coupons {
            Coupon::new(def.code.clone(), def.discount_percent).map_err(|source| {
                SettingsError::InvalidCoupon {
                    code: def.code.clone(),
                    source,
                }
            })?;
        }

        Ok(settings)
    }

    /// Resolve a coupon code against the coupon table.
    ///
    /// Matching is case-insensitive. Returns `None` for unknown codes.
    #[must_use]
    pub fn coupon(&self, code: &str) -> Option<Coupon> {
        self.coupons
            .iter()
            .find(|def| def.code.eq_ignore_ascii_case(code))
            .and_then(|def| Coupon::new(def.code.clone(), def.discount_percent).ok())
    }

    /// Look up a shipping method by id.
    #[must_use]
    pub fn shipping_method(&self, id: &str) -> Option<&ShippingMethod> {
        self.shipping_methods.iter().find(|method| method.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> StoreSettings {
        StoreSettings {
            store_name: "ShopSphere".to_owned(),
            currency: CurrencyCode::USD,
            tax_rate: Decimal::new(7, 2),
            shipping_methods: vec![ShippingMethod {
                id: "standard".to_owned(),
                name: "Standard Shipping".to_owned(),
                price: Decimal::new(599, 2),
            }],
            coupons: vec![CouponDef {
                code: "SAVE20".to_owned(),
                discount_percent: Decimal::from(20),
            }],
        }
    }

    #[test]
    fn test_coupon_lookup_case_insensitive() {
        let settings = sample();

        let coupon = settings.coupon("save20").unwrap();
        assert_eq!(coupon.code(), "SAVE20");
        assert_eq!(coupon.discount_percent(), Decimal::from(20));

        assert!(settings.coupon("UNKNOWN").is_none());
    }

    #[test]
    fn test_shipping_method_lookup() {
        let settings = sample();

        assert!(settings.shipping_method("standard").is_some());
        assert!(settings.shipping_method("drone").is_none());
    }

    #[test]
    fn test_parse_fixture_shape() {
        let json = r#"{
            "store_name": "ShopSphere",
            "currency": "USD",
            "tax_rate": "0.07",
            "shipping_methods": [
                { "id": "standard", "name": "Standard Shipping", "price": "5.99" }
            ],
            "coupons": [
                { "code": "WELCOME10", "discount_percent": "10" }
            ]
        }"#;

        let settings: StoreSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tax_rate, Decimal::new(7, 2));
        assert!(settings.coupon("welcome10").is_some());
    }
}
