//! Catalog management handlers: product and unit CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use farmhaat_core::{ProductId, UnitId};

use crate::db::products::{ProductPatch, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::models::product::ProductWithUnits;
use crate::state::AppState;

/// List all products with their units.
#[instrument(skip(state))]
pub async fn index(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list().await?;

    let mut with_units = Vec::with_capacity(products.len());
    for product in products {
        let units = repo.list_units(product.id).await?;
        with_units.push(ProductWithUnits { product, units });
    }

    Ok(Json(json!({ "products": with_units })))
}

/// Create-product payload.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
}

/// Create a product.
#[instrument(skip(state, payload))]
pub async fn create(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Value>)> {
    let name = payload.name.trim();
    let category = payload.category.trim();
    if name.is_empty() || category.is_empty() {
        return Err(AppError::BadRequest(
            "name and category are required".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .create(
            name,
            payload.description.trim(),
            category,
            payload.image_url.as_deref(),
        )
        .await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(json!({ "product": product }))))
}

/// Partial-update payload. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Partially update a product.
#[instrument(skip(state, payload))]
pub async fn update(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<UpdateProduct>,
) -> Result<Json<Value>> {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }
    if let Some(category) = &payload.category
        && category.trim().is_empty()
    {
        return Err(AppError::BadRequest("category cannot be empty".to_string()));
    }

    let patch = ProductPatch {
        name: payload.name.as_deref().map(str::trim),
        description: payload.description.as_deref().map(str::trim),
        category: payload.category.as_deref().map(str::trim),
        image_url: payload.image_url.as_deref(),
    };

    let product = ProductRepository::new(state.pool())
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(json!({ "product": product })))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn remove(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let removed = ProductRepository::new(state.pool()).delete(id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// List a product's units.
#[instrument(skip(state))]
pub async fn list_units(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>> {
    let repo = ProductRepository::new(state.pool());
    if repo.get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    let units = repo.list_units(id).await?;

    Ok(Json(json!({ "units": units })))
}

/// Unit payload, used for both create and update.
#[derive(Debug, Deserialize)]
pub struct UnitPayload {
    pub label: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub stock: i32,
}

impl UnitPayload {
    fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(AppError::BadRequest("label is required".to_string()));
        }
        if self.price <= Decimal::ZERO {
            return Err(AppError::BadRequest("price must be positive".to_string()));
        }
        if let Some(discounted) = self.discounted_price
            && (discounted <= Decimal::ZERO || discounted >= self.price)
        {
            return Err(AppError::BadRequest(
                "discounted_price must be positive and below price".to_string(),
            ));
        }
        if self.stock < 0 {
            return Err(AppError::BadRequest("stock cannot be negative".to_string()));
        }
        Ok(())
    }
}

/// Add a unit to a product.
#[instrument(skip(state, payload))]
pub async fn create_unit(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<UnitPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    payload.validate()?;

    let repo = ProductRepository::new(state.pool());
    if repo.get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    let unit = repo
        .create_unit(
            id,
            payload.label.trim(),
            payload.price,
            payload.discounted_price,
            payload.stock,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "unit": unit }))))
}

/// Replace a unit's label, prices, and stock.
#[instrument(skip(state, payload))]
pub async fn update_unit(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path((id, unit_id)): Path<(ProductId, UnitId)>,
    Json(payload): Json<UnitPayload>,
) -> Result<Json<Value>> {
    payload.validate()?;

    let unit = ProductRepository::new(state.pool())
        .update_unit(
            id,
            unit_id,
            payload.label.trim(),
            payload.price,
            payload.discounted_price,
            payload.stock,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("unit {unit_id} on product {id}")))?;

    Ok(Json(json!({ "unit": unit })))
}

/// Delete a unit.
#[instrument(skip(state))]
pub async fn remove_unit(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Path((id, unit_id)): Path<(ProductId, UnitId)>,
) -> Result<StatusCode> {
    let removed = ProductRepository::new(state.pool())
        .delete_unit(id, unit_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound(format!("unit {unit_id} on product {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}
