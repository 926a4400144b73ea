//! Intake review repository: contact submissions, newsletter subscribers,
//! seller applications.

use sqlx::PgPool;

use farmhaat_core::{ApplicationStatus, SellerApplicationId};

use super::RepositoryError;
use crate::models::intake::{ContactSubmission, NewsletterSubscriber, SellerApplication};

const APPLICATION_COLUMNS: &str =
    "id, name, email, phone, farm_name, message, status, created_at, updated_at";

/// Repository for intake review operations.
pub struct IntakeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> IntakeRepository<'a> {
    /// Create a new intake repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List contact form submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_contact_submissions(
        &self,
    ) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let submissions = sqlx::query_as::<_, ContactSubmission>(
            "SELECT id, name, email, subject, message, created_at
             FROM contact_submissions
             ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(submissions)
    }

    /// List newsletter subscribers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_newsletter_subscribers(
        &self,
    ) -> Result<Vec<NewsletterSubscriber>, RepositoryError> {
        let subscribers = sqlx::query_as::<_, NewsletterSubscriber>(
            "SELECT id, email, created_at FROM newsletter_subscribers ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(subscribers)
    }

    /// List seller applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_seller_applications(
        &self,
    ) -> Result<Vec<SellerApplication>, RepositoryError> {
        let applications = sqlx::query_as::<_, SellerApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM seller_applications ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(applications)
    }

    /// Set a seller application's review status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_application_status(
        &self,
        id: SellerApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<SellerApplication>, RepositoryError> {
        let application = sqlx::query_as::<_, SellerApplication>(&format!(
            "UPDATE seller_applications
             SET status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        Ok(application)
    }
}
