//! Favorites route handlers (all require auth).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use farmhaat_core::ProductId;

use crate::db::favorites::FavoriteRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::product::FavoriteProduct;
use crate::state::AppState;

/// The caller's favorites, newest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<FavoriteProduct>>> {
    let favorites = FavoriteRepository::new(state.pool()).list(user.id).await?;
    Ok(Json(favorites))
}

/// Payload for adding a favorite.
#[derive(Debug, Deserialize)]
pub struct AddFavorite {
    pub product_id: ProductId,
}

/// Favorite a product. Favoriting twice is a no-op success.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<AddFavorite>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .get(payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", payload.product_id)))?;

    FavoriteRepository::new(state.pool())
        .add(user.id, payload.product_id)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Remove a product from favorites.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode> {
    if !FavoriteRepository::new(state.pool())
        .remove(user.id, product_id)
        .await?
    {
        return Err(AppError::NotFound(format!("favorite {product_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
