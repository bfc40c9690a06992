//! Integration tests for ShopSphere.
//!
//! # Running Tests
//!
//! The tests drive a running storefront over HTTP and are `#[ignore]`d by
//! default:
//!
//! ```bash
//! # Seed fixtures and create the session schema
//! cargo run -p shopsphere-cli -- seed
//! cargo run -p shopsphere-cli -- migrate
//!
//! # Start the storefront
//! cargo run -p shopsphere-storefront
//!
//! # Run the integration tests against it
//! cargo test -p shopsphere-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart lifecycle and derived totals
//! - `authorization` - Role gating and redirect behavior

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with its own cookie jar (its own session/cart), not following
/// redirects so tests can assert on them.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
