//! Demo catalog seeding for local development.

use rust_decimal::Decimal;

use super::{CliError, connect};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    units: &'static [SeedUnit],
}

struct SeedUnit {
    label: &'static str,
    price: Decimal,
    discounted_price: Option<Decimal>,
    stock: i32,
}

const fn rupees(whole: i64) -> Decimal {
    Decimal::from_parts(whole.unsigned_abs() as u32, 0, 0, false, 0)
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Organic Wheat",
        description: "Stone-ground whole wheat from rain-fed fields, milled weekly.",
        category: "grains",
        units: &[
            SeedUnit {
                label: "5 kg bag",
                price: rupees(320),
                discounted_price: Some(rupees(290)),
                stock: 40,
            },
            SeedUnit {
                label: "10 kg bag",
                price: rupees(600),
                discounted_price: None,
                stock: 25,
            },
        ],
    },
    SeedProduct {
        name: "Cold-Pressed Groundnut Oil",
        description: "Single-origin groundnut oil, wood-pressed in small batches.",
        category: "oils",
        units: &[SeedUnit {
            label: "1 L bottle",
            price: rupees(450),
            discounted_price: None,
            stock: 60,
        }],
    },
    SeedProduct {
        name: "Turmeric Powder",
        description: "High-curcumin turmeric, sun-dried and ground on order.",
        category: "spices",
        units: &[
            SeedUnit {
                label: "250 g pouch",
                price: rupees(120),
                discounted_price: None,
                stock: 100,
            },
            SeedUnit {
                label: "1 kg pouch",
                price: rupees(420),
                discounted_price: Some(rupees(380)),
                stock: 30,
            },
        ],
    },
];

/// Insert demo products. Refuses to run against a non-empty catalog.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        return Err(CliError::InvalidInput(format!(
            "catalog already has {existing} products, refusing to seed"
        )));
    }

    let mut tx = pool.begin().await?;

    for product in SEED_PRODUCTS {
        let product_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO products (name, description, category)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.category)
        .fetch_one(&mut *tx)
        .await?;

        for unit in product.units {
            sqlx::query(
                "INSERT INTO product_units (product_id, label, price, discounted_price, stock)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(product_id)
            .bind(unit.label)
            .bind(unit.price)
            .bind(unit.discounted_price)
            .bind(unit.stock)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    println!("Seeded {} products", SEED_PRODUCTS.len());

    Ok(())
}
