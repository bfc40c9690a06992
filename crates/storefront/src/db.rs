//! Database operations for the storefront session store.
//!
//! The only database in ShopSphere is a local `SQLite` file backing
//! tower-sessions. Catalog, users, orders, and settings live in the JSON
//! fixtures under the configured data directory; there is no further schema.
//!
//! The session table is created via:
//! ```bash
//! cargo run -p shopsphere-cli -- migrate
//! ```

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database file cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}
