//! Cart repository. One row per (user, product, unit).

use sqlx::PgPool;

use farmhaat_core::{CartItemId, ProductId, UnitId, UserId};

use super::RepositoryError;
use crate::models::product::CartLine;

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The user's cart, joined with product and unit data at current prices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT c.id, c.product_id, p.name AS product_name, p.image_url,
                    c.unit_id, u.label AS unit_label, u.price, u.discounted_price,
                    c.quantity
             FROM cart_items c
             JOIN products p ON p.id = c.product_id
             JOIN product_units u ON u.id = c.unit_id
             WHERE c.user_id = $1
             ORDER BY c.created_at",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Add a unit to the cart; existing rows accumulate quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        unit_id: UnitId,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CartItemId>(
            "INSERT INTO cart_items (user_id, product_id, unit_id, quantity)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, product_id, unit_id)
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
             RETURNING id",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(unit_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Set the quantity of a cart row owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the row doesn't exist or
    /// belongs to another user.
    pub async fn update_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE cart_items SET quantity = $1 WHERE id = $2 AND user_id = $3",
        )
        .bind(quantity)
        .bind(item_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a cart row owned by the user.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
