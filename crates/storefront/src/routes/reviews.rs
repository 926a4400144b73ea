//! Review and rating route handlers.
//!
//! Both are gated on purchase: the caller needs a DELIVERED order
//! containing the product, otherwise 403.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use farmhaat_core::{ProductId, UserId};

use crate::db::orders::OrderRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::review::{Rating, Review};
use crate::state::AppState;

/// Payload for creating a review.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub product_id: ProductId,
    pub title: String,
    pub body: String,
}

/// Create a review for a purchased product. One per (user, product).
#[instrument(skip(state, payload), fields(product_id = %payload.product_id))]
pub async fn create_review(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<CreateReview>,
) -> Result<(StatusCode, Json<Review>)> {
    let title = payload.title.trim();
    let body = payload.body.trim();
    if title.is_empty() || body.is_empty() {
        return Err(AppError::BadRequest(
            "title and body are required".to_string(),
        ));
    }

    require_delivered(&state, user.id, payload.product_id).await?;

    let review = ReviewRepository::new(state.pool())
        .create(user.id, payload.product_id, title, body)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Payload for submitting a rating.
#[derive(Debug, Deserialize)]
pub struct SubmitRating {
    pub product_id: ProductId,
    pub value: i16,
}

/// Rate a purchased product 1-5. Resubmitting overwrites the old value
/// and the product's aggregate is recomputed.
#[instrument(skip(state, payload), fields(product_id = %payload.product_id))]
pub async fn submit_rating(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<SubmitRating>,
) -> Result<Json<Rating>> {
    if !(1..=5).contains(&payload.value) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    require_delivered(&state, user.id, payload.product_id).await?;

    let rating = ReviewRepository::new(state.pool())
        .upsert_rating(user.id, payload.product_id, payload.value)
        .await?;

    Ok(Json(rating))
}

/// The purchase gate shared by reviews and ratings.
async fn require_delivered(
    state: &AppState,
    user_id: UserId,
    product_id: ProductId,
) -> Result<()> {
    let delivered = OrderRepository::new(state.pool())
        .has_delivered_item(user_id, product_id)
        .await?;

    if !delivered {
        return Err(AppError::Forbidden(
            "you can only review products from delivered orders".to_string(),
        ));
    }

    Ok(())
}
