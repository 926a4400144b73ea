//! Catalog repository: products, units, and view history.

use sqlx::{PgPool, Postgres, QueryBuilder};

use farmhaat_core::{ProductId, UnitId, UserId};

use super::RepositoryError;
use crate::models::product::{Product, ProductUnit};

const PRODUCT_COLUMNS: &str = "id, name, description, category, image_url, \
                               average_rating, rating_count, created_at, updated_at";

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Catalog list filter.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name/description.
    pub query: Option<String>,
    pub category: Option<String>,
    pub sort: ProductSort,
    pub limit: i64,
    pub offset: i64,
}

/// Repository for catalog reads and view history.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching a filter.
    ///
    /// Price sorting uses the cheapest effective unit price per product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE TRUE"
        ));

        if let Some(q) = &filter.query {
            let pattern = format!("%{q}%");
            qb.push(" AND (p.name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR p.description ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        if let Some(category) = &filter.category {
            qb.push(" AND p.category = ");
            qb.push_bind(category.clone());
        }

        match filter.sort {
            ProductSort::Newest => {
                qb.push(" ORDER BY p.created_at DESC");
            }
            ProductSort::PriceAsc | ProductSort::PriceDesc => {
                qb.push(
                    " ORDER BY (SELECT MIN(COALESCE(u.discounted_price, u.price))
                       FROM product_units u WHERE u.product_id = p.id)",
                );
                if filter.sort == ProductSort::PriceDesc {
                    qb.push(" DESC");
                }
                qb.push(" NULLS LAST");
            }
        }

        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        let products = qb.build_query_as::<Product>().fetch_all(self.pool).await?;

        Ok(products)
    }

    /// Count products matching a filter (ignores sort and pagination).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &ProductFilter) -> Result<i64, RepositoryError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM products p WHERE TRUE");

        if let Some(q) = &filter.query {
            let pattern = format!("%{q}%");
            qb.push(" AND (p.name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR p.description ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        if let Some(category) = &filter.category {
            qb.push(" AND p.category = ");
            qb.push_bind(category.clone());
        }

        let count: i64 = qb.build_query_scalar().fetch_one(self.pool).await?;

        Ok(count)
    }

    /// Get a single product by ID.
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

    /// Fetch the units for a set of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn units_for(
        &self,
        product_ids: &[ProductId],
    ) -> Result<Vec<ProductUnit>, RepositoryError> {
        let ids: Vec<i32> = product_ids.iter().map(|id| id.as_i32()).collect();

        let units = sqlx::query_as::<_, ProductUnit>(
            "SELECT id, product_id, label, price, discounted_price, stock
             FROM product_units
             WHERE product_id = ANY($1)
             ORDER BY product_id, price",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(units)
    }

    /// Get a single unit by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_unit(&self, id: UnitId) -> Result<Option<ProductUnit>, RepositoryError> {
        let unit = sqlx::query_as::<_, ProductUnit>(
            "SELECT id, product_id, label, price, discounted_price, stock
             FROM product_units
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(unit)
    }

    /// Record that a user viewed a product (upsert on the view-history PK).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn record_view(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO recent_products (user_id, product_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, product_id) DO UPDATE SET viewed_at = now()",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The user's most recently viewed products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT p.id, p.name, p.description, p.category, p.image_url,
                    p.average_rating, p.rating_count, p.created_at, p.updated_at
             FROM recent_products r
             JOIN products p ON p.id = r.product_id
             WHERE r.user_id = $1
             ORDER BY r.viewed_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
