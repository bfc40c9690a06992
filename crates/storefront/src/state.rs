//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;

use shopsphere_core::cart::Cart;
use shopsphere_core::types::CurrencyCode;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::fixtures::FixtureError;
use crate::settings::{SettingsError, StoreSettings};
use crate::stores::{OrderStore, UserStore};

/// Error building the application state from fixtures.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is the single owned state
/// container per application instance; nothing here is a global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: SqlitePool,
    catalog: Catalog,
    users: UserStore,
    orders: OrderStore,
    settings: StoreSettings,
}

impl AppState {
    /// Build the application state, reading all fixtures from the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any fixture file is missing or malformed.
    pub fn load(config: StorefrontConfig, pool: SqlitePool) -> Result<Self, StateError> {
        let data_dir = config.data_dir.clone();
        let catalog = Catalog::load(&data_dir.join("products.json"))?;
        let users = UserStore::load(&data_dir.join("users.json"))?;
        let orders = OrderStore::load(&data_dir.join("orders.json"))?;
        let settings = StoreSettings::load(&data_dir.join("settings.json"))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                users,
                orders,
                settings,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the session-store connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get a reference to the store settings.
    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.inner.settings
    }

    /// The store currency.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.settings.currency
    }

    /// A fresh cart using the configured tax rate.
    #[must_use]
    pub fn new_cart(&self) -> Cart {
        Cart::with_tax_rate(self.inner.settings.tax_rate)
    }
}
