//! Database seeder for Duka development and testing.
//!
//! Seeds one user per role, product categories, and sample products for
//! local development and testing purposes.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::str::FromStr;
use uuid::Uuid;

use duka_db::entities::{
    categories, products,
    sea_orm_active_enums::UserRole,
    users,
};

/// Boss user ID (consistent for all seeds)
const BOSS_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Manager user ID (consistent for all seeds)
const MANAGER_USER_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Seller user ID (consistent for all seeds)
const SELLER_USER_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Data plans category ID (consistent for all seeds)
const DATA_PLANS_CATEGORY_ID: &str = "00000000-0000-0000-0000-000000000010";
/// Routers category ID (consistent for all seeds)
const ROUTERS_CATEGORY_ID: &str = "00000000-0000-0000-0000-000000000011";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = duka_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding users...");
    seed_users(&db).await;

    println!("Seeding categories...");
    seed_categories(&db).await;

    println!("Seeding products...");
    seed_products(&db).await;

    println!("Seeding complete!");
}

fn id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

/// Seeds one user per role.
async fn seed_users(db: &DatabaseConnection) {
    let seeds = [
        (BOSS_USER_ID, "boss", "Big Boss", UserRole::Boss, "BOSS001"),
        (
            MANAGER_USER_ID,
            "manager",
            "Store Manager",
            UserRole::Manager,
            "MGR001",
        ),
        (
            SELLER_USER_ID,
            "seller",
            "Shop Seller",
            UserRole::Seller,
            "SEL001",
        ),
    ];

    for (user_id, username, full_name, role, employee_id) in seeds {
        if users::Entity::find_by_id(id(user_id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {username} already exists, skipping...");
            continue;
        }

        let user = users::ActiveModel {
            id: Set(id(user_id)),
            username: Set(username.to_string()),
            full_name: Set(full_name.to_string()),
            role: Set(role),
            employee_id: Set(Some(employee_id.to_string())),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        };
        user.insert(db).await.expect("Failed to seed user");
    }
}

/// Seeds product categories.
async fn seed_categories(db: &DatabaseConnection) {
    let seeds = [
        (DATA_PLANS_CATEGORY_ID, "Data Plans", "Mobile data bundles"),
        (ROUTERS_CATEGORY_ID, "Routers", "Routers and modems"),
    ];

    for (category_id, name, description) in seeds {
        if categories::Entity::find_by_id(id(category_id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Category {name} already exists, skipping...");
            continue;
        }

        let category = categories::ActiveModel {
            id: Set(id(category_id)),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            created_at: Set(Utc::now().into()),
        };
        category
            .insert(db)
            .await
            .expect("Failed to seed category");
    }
}

/// Seeds sample products.
async fn seed_products(db: &DatabaseConnection) {
    let seeds = [
        (
            "4G Data Plan 10GB",
            DATA_PLANS_CATEGORY_ID,
            "25000",
            "15000",
            100,
            10,
        ),
        (
            "Fiber Optic Router",
            ROUTERS_CATEGORY_ID,
            "299999",
            "199999",
            15,
            5,
        ),
    ];

    for (name, category_id, price, cost_price, stock, min_level) in seeds {
        let existing = products::Entity::find()
            .all(db)
            .await
            .unwrap_or_default()
            .into_iter()
            .any(|p| p.name == name);
        if existing {
            println!("  Product {name} already exists, skipping...");
            continue;
        }

        let now = Utc::now().into();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(Some(id(category_id))),
            name: Set(name.to_string()),
            description: Set(None),
            price: Set(Decimal::from_str(price).expect("valid price")),
            cost_price: Set(Decimal::from_str(cost_price).expect("valid cost price")),
            stock_quantity: Set(stock),
            min_stock_level: Set(min_level),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        product.insert(db).await.expect("Failed to seed product");
    }
}
