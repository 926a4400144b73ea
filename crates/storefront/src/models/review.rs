//! Review and rating models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use farmhaat_core::{ProductId, RatingId, ReviewId, UserId};

/// A product review, one per (user, product).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A review joined with the author's display name for listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewWithAuthor {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A star rating (1-5), one per (user, product), overwritten on resubmit.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub value: i16,
}
