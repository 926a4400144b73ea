//! Database operations for the storefront `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users`, `accounts` - Authentication and OAuth links
//! - `email_verification_tokens`, `password_reset_tokens`
//! - `products`, `product_units` - Catalog
//! - `cart_items`, `favorites`, `recent_products` - Per-user collections
//! - `orders`, `order_items`, `payment_transactions` - Checkout output
//! - `reviews`, `ratings` - Purchase-gated feedback
//! - `contact_submissions`, `newsletter_subscribers`, `seller_applications`
//!
//! The session table is managed by tower-sessions-sqlx-store.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p farmhaat-cli -- migrate
//! ```

pub mod cart;
pub mod favorites;
pub mod intake;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod tokens;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique-violation database error to `RepositoryError::Conflict`.
pub(crate) fn conflict_on_unique(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
