//! Email verification and password reset token repository.
//!
//! Tokens are opaque UUID strings with an expiry; consuming a token deletes
//! it, so each can be used at most once.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use farmhaat_core::UserId;

use super::RepositoryError;

/// Repository for single-use auth tokens.
pub struct TokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TokenRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store an email verification token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_email_verification(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO email_verification_tokens (token, user_id, expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Consume an email verification token, returning the user it belongs to.
    ///
    /// Expired or unknown tokens return `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn consume_email_verification(
        &self,
        token: &str,
    ) -> Result<Option<UserId>, RepositoryError> {
        let user_id = sqlx::query_scalar::<_, UserId>(
            "DELETE FROM email_verification_tokens
             WHERE token = $1 AND expires_at > now()
             RETURNING user_id",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user_id)
    }

    /// Store a password reset token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_password_reset(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO password_reset_tokens (token, user_id, expires_at)
             VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Consume a password reset token, returning the user it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn consume_password_reset(
        &self,
        token: &str,
    ) -> Result<Option<UserId>, RepositoryError> {
        let user_id = sqlx::query_scalar::<_, UserId>(
            "DELETE FROM password_reset_tokens
             WHERE token = $1 AND expires_at > now()
             RETURNING user_id",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user_id)
    }
}
