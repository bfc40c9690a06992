//! ShopSphere Core - Shared domain library.
//!
//! This crate provides the common types and the two pieces of derived-state
//! logic used across all ShopSphere components:
//! - `storefront` - Public-facing e-commerce site with role-gated admin consoles
//! - `cli` - Command-line tools for migrations, seeding, and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, roles, and statuses
//! - [`cart`] - Shopping cart with derived pricing totals
//! - [`authz`] - Role-based route authorization decisions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod authz;
pub mod cart;
pub mod types;

pub use types::*;
