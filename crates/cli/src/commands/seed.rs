//! Fixture seeding.
//!
//! Writes a small sample store into the data directory: a product catalog,
//! demo accounts for each role, an empty order book, and store settings with
//! the shipping method and coupon tables.

use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;

use shopsphere_core::cart::ShippingMethod;
use shopsphere_core::{Email, ProductId, Role, UserId};

use shopsphere_storefront::catalog::Product;
use shopsphere_storefront::fixtures::store_fixture;
use shopsphere_storefront::models::{Order, StoredUser};
use shopsphere_storefront::services::auth::hash_password;
use shopsphere_storefront::settings::{CouponDef, StoreSettings};

/// Password for every seeded demo account.
const DEMO_PASSWORD: &str = "shopsphere-demo";

/// Write the sample fixtures.
///
/// Existing files are left alone unless `force` is set.
///
/// # Errors
///
/// Returns an error if a fixture cannot be written or password hashing fails.
pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = super::data_dir();
    std::fs::create_dir_all(&dir)?;

    write_if_absent(&dir.join("products.json"), force, sample_products())?;
    write_if_absent(&dir.join("users.json"), force, sample_users()?)?;
    write_if_absent(&dir.join("orders.json"), force, Vec::<Order>::new())?;
    write_if_absent(&dir.join("settings.json"), force, sample_settings())?;

    tracing::info!(
        "Fixtures written to {} (demo accounts use password {DEMO_PASSWORD:?})",
        dir.display()
    );
    Ok(())
}

fn write_if_absent<T: serde::Serialize>(
    path: &Path,
    force: bool,
    value: T,
) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        tracing::info!("Skipping existing {}", path.display());
        return Ok(());
    }
    store_fixture(path, &value)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn dollars(units: i64, cents: i64) -> Decimal {
    Decimal::new(units * 100 + cents, 2)
}

fn sample_products() -> Vec<Product> {
    let product = |id, name: &str, description: &str, price, category: &str, image: &str, stock, featured| Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        category: category.to_owned(),
        image: Some(image.to_owned()),
        stock,
        featured,
    };

    vec![
        product(
            1,
            "Wireless Headphones",
            "Over-ear noise cancelling headphones with 30 hour battery life.",
            dollars(149, 99),
            "Electronics",
            "/images/headphones.jpg",
            25,
            true,
        ),
        product(
            2,
            "Smart Watch",
            "Fitness tracking, heart rate monitoring, and notifications.",
            dollars(199, 99),
            "Electronics",
            "/images/smartwatch.jpg",
            18,
            true,
        ),
        product(
            3,
            "Cotton T-Shirt",
            "Classic fit crew neck in organic cotton.",
            dollars(19, 99),
            "Clothing",
            "/images/tshirt.jpg",
            120,
            false,
        ),
        product(
            4,
            "Denim Jacket",
            "Mid-weight denim jacket with button front.",
            dollars(59, 99),
            "Clothing",
            "/images/jacket.jpg",
            40,
            false,
        ),
        product(
            5,
            "Ceramic Mug Set",
            "Set of four stoneware mugs, dishwasher safe.",
            dollars(34, 99),
            "Kitchen",
            "/images/mugs.jpg",
            60,
            false,
        ),
        product(
            6,
            "Chef's Knife",
            "8 inch high-carbon stainless steel blade.",
            dollars(89, 99),
            "Kitchen",
            "/images/knife.jpg",
            15,
            true,
        ),
    ]
}

fn sample_users() -> Result<Vec<StoredUser>, Box<dyn std::error::Error>> {
    let now = Utc::now();
    let make = |id, email: &str, name: &str, role| -> Result<StoredUser, Box<dyn std::error::Error>> {
        Ok(StoredUser {
            id: UserId::new(id),
            email: Email::parse(email)?,
            name: name.to_owned(),
            role,
            password_hash: hash_password(DEMO_PASSWORD)?,
            join_date: now,
        })
    };

    Ok(vec![
        make(1, "super@shopsphere.test", "Site Owner", Role::SuperAdmin)?,
        make(2, "admin@shopsphere.test", "Store Admin", Role::Admin)?,
        make(3, "user@shopsphere.test", "Demo Shopper", Role::User)?,
    ])
}

fn sample_settings() -> StoreSettings {
    StoreSettings {
        store_name: "ShopSphere".to_owned(),
        currency: shopsphere_core::types::CurrencyCode::USD,
        tax_rate: Decimal::new(7, 2),
        shipping_methods: vec![
            ShippingMethod {
                id: "standard".to_owned(),
                name: "Standard Shipping".to_owned(),
                price: dollars(5, 99),
            },
            ShippingMethod {
                id: "express".to_owned(),
                name: "Express Shipping".to_owned(),
                price: dollars(14, 99),
            },
            ShippingMethod {
                id: "priority".to_owned(),
                name: "Priority Shipping".to_owned(),
                price: dollars(24, 99),
            },
        ],
        coupons: vec![
            CouponDef {
                code: "WELCOME10".to_owned(),
                discount_percent: Decimal::from(10),
            },
            CouponDef {
                code: "SAVE20".to_owned(),
                discount_percent: Decimal::from(20),
            },
        ],
    }
}
