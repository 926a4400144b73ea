//! Public intake repository: contact form, newsletter, seller applications.

use sqlx::PgPool;

use farmhaat_core::{ContactSubmissionId, Email, SellerApplicationId};

use super::RepositoryError;

/// Repository for anonymous intake writes.
pub struct IntakeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> IntakeRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_contact(
        &self,
        name: &str,
        email: &Email,
        subject: &str,
        message: &str,
    ) -> Result<ContactSubmissionId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ContactSubmissionId>(
            "INSERT INTO contact_submissions (name, email, subject, message)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Subscribe an email to the newsletter. Re-subscribing is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn subscribe_newsletter(&self, email: &Email) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO newsletter_subscribers (email)
             VALUES ($1)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Store a seller application (status starts PENDING).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_seller_application(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        farm_name: &str,
        message: &str,
    ) -> Result<SellerApplicationId, RepositoryError> {
        let id = sqlx::query_scalar::<_, SellerApplicationId>(
            "INSERT INTO seller_applications (name, email, phone, farm_name, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(farm_name)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
