//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use shopsphere_core::types::{CurrencyCode, Money, ProductId};

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: Option<String>,
    pub stock: u32,
    pub featured: bool,
}

impl ProductView {
    pub(crate) fn build(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: Money::new(product.price, currency).display(),
            category: product.category.clone(),
            image: product.image.clone(),
            stock: product.stock,
            featured: product.featured,
        }
    }
}

/// Product listing response.
#[derive(Debug, Clone, Serialize)]
pub struct ProductsView {
    pub products: Vec<ProductView>,
    pub total: usize,
}

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Display the product listing, optionally filtered.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<ProductsView> {
    let currency = state.currency();
    let products: Vec<ProductView> = state
        .catalog()
        .all()
        .iter()
        .filter(|product| match &query.category {
            Some(category) => product.category.eq_ignore_ascii_case(category),
            None => true,
        })
        .filter(|product| match query.featured {
            Some(featured) => product.featured == featured,
            None => true,
        })
        .map(|product| ProductView::build(product, currency))
        .collect();

    let total = products.len();
    Json(ProductsView { products, total })
}

/// Display a single product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>> {
    let product = state
        .catalog()
        .get(ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::build(product, state.currency())))
}

/// Display products in a category.
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ProductsView> {
    let currency = state.currency();
    let products: Vec<ProductView> = state
        .catalog()
        .by_category(&category)
        .into_iter()
        .map(|product| ProductView::build(product, currency))
        .collect();

    let total = products.len();
    Json(ProductsView { products, total })
}
