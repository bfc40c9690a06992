//! Fixture-backed state stores.
//!
//! Users and orders are loaded from JSON fixtures at startup and held in
//! memory behind async locks. Each request's mutation runs to completion
//! while holding the write lock, so there is no interleaving between
//! operations on the same store.

pub mod orders;
pub mod users;

pub use orders::OrderStore;
pub use users::{UserStore, UserStoreError};
