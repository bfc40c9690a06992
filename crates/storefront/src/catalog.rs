//! Product catalog backed by the `products.json` fixture.
//!
//! The catalog is the opaque lookup collaborator for the cart: it is read
//! once at startup and the cart trusts the price/name/image values it hands
//! out when a line is added.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopsphere_core::ProductId;

use crate::fixtures::{FixtureError, load_fixture};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Category name (e.g. "Electronics").
    pub category: String,
    /// Image reference, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Units in stock.
    pub stock: u32,
    /// Whether the product is featured on the home page.
    #[serde(default)]
    pub featured: bool,
}

/// In-memory product catalog with id-based lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Load the catalog from a `products.json` fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let products: Vec<Product> = load_fixture(path)?;
        Ok(Self::from_products(products))
    }

    /// Build a catalog from an in-memory product list.
    ///
    /// Later entries win on duplicate ids.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id, index))
            .collect();
        Self { products, by_id }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.by_id
            .get(&id)
            .and_then(|&index| self.products.get(index))
    }

    /// All products, in fixture order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products in a category (case-insensitive match).
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Featured products.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
