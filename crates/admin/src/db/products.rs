//! Catalog management repository: product and unit CRUD.

use rust_decimal::Decimal;
use sqlx::PgPool;

use farmhaat_core::{ProductId, UnitId};

use super::RepositoryError;
use crate::models::product::{Product, ProductUnit};

const PRODUCT_COLUMNS: &str =
    "id, name, description, category, image_url, average_rating, rating_count, \
     created_at, updated_at";

const UNIT_COLUMNS: &str = "id, product_id, label, price, discounted_price, stock";

/// Partial update for a product. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct ProductPatch<'p> {
    pub name: Option<&'p str>,
    pub description: Option<&'p str>,
    pub category: Option<&'p str>,
    pub image_url: Option<&'p str>,
}

/// Repository for admin catalog operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        category: &str,
        image_url: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, category, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Partially update a product. Omitted fields keep their value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch<'_>,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 category = COALESCE($4, category),
                 image_url = COALESCE($5, image_url),
                 updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.category)
        .bind(patch.image_url)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Delete a product. Units, cart lines, favorites, reviews, and ratings
    /// cascade; order item snapshots survive with a null product reference.
    ///
    /// Returns `false` if no product existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a product's units.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_units(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductUnit>, RepositoryError> {
        let units = sqlx::query_as::<_, ProductUnit>(&format!(
            "SELECT {UNIT_COLUMNS} FROM product_units WHERE product_id = $1 ORDER BY id"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(units)
    }

    /// Add a unit to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_unit(
        &self,
        product_id: ProductId,
        label: &str,
        price: Decimal,
        discounted_price: Option<Decimal>,
        stock: i32,
    ) -> Result<ProductUnit, RepositoryError> {
        let unit = sqlx::query_as::<_, ProductUnit>(&format!(
            "INSERT INTO product_units (product_id, label, price, discounted_price, stock)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {UNIT_COLUMNS}"
        ))
        .bind(product_id)
        .bind(label)
        .bind(price)
        .bind(discounted_price)
        .bind(stock)
        .fetch_one(self.pool)
        .await?;

        Ok(unit)
    }

    /// Replace a unit's label, prices, and stock.
    ///
    /// The product id is part of the predicate so a unit can never be
    /// edited through the wrong product's URL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_unit(
        &self,
        product_id: ProductId,
        unit_id: UnitId,
        label: &str,
        price: Decimal,
        discounted_price: Option<Decimal>,
        stock: i32,
    ) -> Result<Option<ProductUnit>, RepositoryError> {
        let unit = sqlx::query_as::<_, ProductUnit>(&format!(
            "UPDATE product_units
             SET label = $3, price = $4, discounted_price = $5, stock = $6
             WHERE id = $2 AND product_id = $1
             RETURNING {UNIT_COLUMNS}"
        ))
        .bind(product_id)
        .bind(unit_id)
        .bind(label)
        .bind(price)
        .bind(discounted_price)
        .bind(stock)
        .fetch_optional(self.pool)
        .await?;

        Ok(unit)
    }

    /// Delete a unit. Returns `false` if it didn't exist under the product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_unit(
        &self,
        product_id: ProductId,
        unit_id: UnitId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product_units WHERE id = $2 AND product_id = $1")
            .bind(product_id)
            .bind(unit_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
