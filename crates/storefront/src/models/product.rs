//! Catalog models: products, order units, cart lines, favorites.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use farmhaat_core::{CartItemId, ProductId, UnitId, UserId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    /// Denormalized aggregate, recomputed on every rating upsert.
    pub average_rating: Decimal,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A priced/stocked variant of a product (e.g. "5 kg bag").
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductUnit {
    pub id: UnitId,
    pub product_id: ProductId,
    pub label: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub stock: i32,
}

impl ProductUnit {
    /// The price the customer actually pays.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.price)
    }
}

/// A product together with its units, as returned by catalog endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithUnits {
    #[serde(flatten)]
    pub product: Product,
    pub units: Vec<ProductUnit>,
}

/// A raw cart row. One per (user, product, unit).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub unit_id: UnitId,
    pub quantity: i32,
}

/// A cart row joined with its product and unit, priced for display
/// and for server-side total computation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub image_url: Option<String>,
    pub unit_id: UnitId,
    pub unit_label: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub quantity: i32,
}

impl CartLine {
    /// Effective unit price (discount applied when present).
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.price)
    }

    /// Line total at current prices.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// A favorited product summary.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FavoriteProduct {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub favorited_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, discounted: Option<i64>, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(1),
            product_id: ProductId::new(1),
            product_name: "Organic Wheat".to_string(),
            image_url: None,
            unit_id: UnitId::new(1),
            unit_label: "5 kg bag".to_string(),
            price: Decimal::new(price, 0),
            discounted_price: discounted.map(|d| Decimal::new(d, 0)),
            quantity,
        }
    }

    #[test]
    fn test_unit_price_prefers_discount() {
        let l = line(100, Some(90), 2);
        assert_eq!(l.unit_price(), Decimal::new(90, 0));
        assert_eq!(l.line_total(), Decimal::new(180, 0));
    }

    #[test]
    fn test_unit_price_without_discount() {
        let l = line(250, None, 3);
        assert_eq!(l.unit_price(), Decimal::new(250, 0));
        assert_eq!(l.line_total(), Decimal::new(750, 0));
    }
}
