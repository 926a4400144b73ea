//! Cart route handlers (all require auth).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::{CartItemId, ProductId, UnitId};

use crate::db::cart::CartRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::product::CartLine;
use crate::state::AppState;

/// Cart response: lines plus the server-computed total.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

impl CartResponse {
    fn from_lines(items: Vec<CartLine>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum();
        Self { items, total }
    }
}

/// The caller's cart with totals at current prices.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartResponse>> {
    let lines = CartRepository::new(state.pool()).lines(user.id).await?;
    Ok(Json(CartResponse::from_lines(lines)))
}

/// Payload for adding an item.
#[derive(Debug, Deserialize)]
pub struct AddItem {
    pub product_id: ProductId,
    pub unit_id: UnitId,
    pub quantity: i32,
}

/// Add a unit to the cart. Adding the same unit again accumulates quantity.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<AddItem>,
) -> Result<(StatusCode, Json<Value>)> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    // The unit must exist and belong to the product the client named.
    let unit = ProductRepository::new(state.pool())
        .get_unit(payload.unit_id)
        .await?
        .filter(|u| u.product_id == payload.product_id)
        .ok_or_else(|| AppError::NotFound(format!("unit {}", payload.unit_id)))?;

    let id = CartRepository::new(state.pool())
        .add(user.id, unit.product_id, unit.id, payload.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Payload for a quantity update.
#[derive(Debug, Deserialize)]
pub struct UpdateItem {
    pub quantity: i32,
}

/// Set the quantity of a cart item.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<CartItemId>,
    Json(payload): Json<UpdateItem>,
) -> Result<Json<CartResponse>> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    let repo = CartRepository::new(state.pool());
    repo.update_quantity(user.id, id, payload.quantity).await?;

    Ok(Json(CartResponse::from_lines(repo.lines(user.id).await?)))
}

/// Remove a cart item.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<CartItemId>,
) -> Result<Json<CartResponse>> {
    let repo = CartRepository::new(state.pool());
    if !repo.remove(user.id, id).await? {
        return Err(AppError::NotFound(format!("cart item {id}")));
    }

    Ok(Json(CartResponse::from_lines(repo.lines(user.id).await?)))
}
