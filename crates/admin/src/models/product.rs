//! Catalog models managed by the admin backend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use farmhaat_core::{ProductId, UnitId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub average_rating: Decimal,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A priced/stocked variant of a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductUnit {
    pub id: UnitId,
    pub product_id: ProductId,
    pub label: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub stock: i32,
}

/// A product together with its units.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithUnits {
    #[serde(flatten)]
    pub product: Product,
    pub units: Vec<ProductUnit>,
}
