//! Intake models: contact submissions, newsletter subscribers, seller
//! applications.

use chrono::{DateTime, Utc};
use serde::Serialize;

use farmhaat_core::{
    ApplicationStatus, ContactSubmissionId, NewsletterSubscriberId, SellerApplicationId,
};

/// A contact form submission.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactSubmission {
    pub id: ContactSubmissionId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsletterSubscriber {
    pub id: NewsletterSubscriberId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A prospective-seller application.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SellerApplication {
    pub id: SellerApplicationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub farm_name: String,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
