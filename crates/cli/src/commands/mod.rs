//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use std::path::PathBuf;

/// The fixture data directory (`SHOPSPHERE_DATA_DIR`, default `data`).
pub fn data_dir() -> PathBuf {
    let _ = dotenvy::dotenv();
    PathBuf::from(std::env::var("SHOPSPHERE_DATA_DIR").unwrap_or_else(|_| "data".to_owned()))
}

/// The session store connection string (`SHOPSPHERE_DATABASE_URL`).
pub fn database_url() -> String {
    let _ = dotenvy::dotenv();
    std::env::var("SHOPSPHERE_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://shopsphere.db?mode=rwc".to_owned())
}
