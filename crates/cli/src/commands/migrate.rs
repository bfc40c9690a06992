//! Session store schema migration.

use tower_sessions_sqlx_store::SqliteStore;

use shopsphere_storefront::db;

/// Create the tower-sessions schema in the `SQLite` store.
///
/// Safe to run repeatedly; the store's migration is idempotent.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let url = super::database_url();
    tracing::info!("Migrating session store at {url}");

    let pool = db::create_pool(&url).await?;
    let store = SqliteStore::new(pool);
    store.migrate().await?;

    tracing::info!("Session store schema is up to date");
    Ok(())
}
