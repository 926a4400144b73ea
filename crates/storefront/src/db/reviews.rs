//! Review and rating repository.
//!
//! Ratings feed the denormalized `average_rating`/`rating_count` columns on
//! `products`, recomputed in the same transaction as the rating write.

use sqlx::PgPool;

use farmhaat_core::{ProductId, UserId};

use super::{conflict_on_unique, RepositoryError};
use crate::models::review::{Rating, Review, ReviewWithAuthor};

/// Repository for reviews and ratings.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reviews for a product, newest first, with author names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ReviewWithAuthor>, RepositoryError> {
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.id, r.product_id, r.title, r.body, u.name AS author, r.created_at
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.product_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Create a review. One per (user, product).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already reviewed this
    /// product.
    pub async fn create(
        &self,
        user_id: UserId,
        product_id: ProductId,
        title: &str,
        body: &str,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (user_id, product_id, title, body)
             VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, product_id, title, body, created_at",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(title)
        .bind(body)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "you have already reviewed this product"))?;

        Ok(review)
    }

    /// Upsert the user's rating for a product and recompute the product's
    /// rating aggregates, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn upsert_rating(
        &self,
        user_id: UserId,
        product_id: ProductId,
        value: i16,
    ) -> Result<Rating, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let rating = sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (user_id, product_id, value)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, product_id)
             DO UPDATE SET value = EXCLUDED.value, updated_at = now()
             RETURNING id, user_id, product_id, value",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(value)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE products p
             SET average_rating = agg.avg_value,
                 rating_count = agg.count,
                 updated_at = now()
             FROM (SELECT ROUND(AVG(value), 2) AS avg_value, COUNT(*) AS count
                   FROM ratings WHERE product_id = $1) agg
             WHERE p.id = $1",
        )
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(rating)
    }

    /// The user's own rating for a product, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_rating(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<Rating>, RepositoryError> {
        let rating = sqlx::query_as::<_, Rating>(
            "SELECT id, user_id, product_id, value
             FROM ratings
             WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(rating)
    }
}
