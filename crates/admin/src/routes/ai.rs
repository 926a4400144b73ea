//! AI content helper handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Description draft payload.
#[derive(Debug, Deserialize)]
pub struct DescriptionPayload {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Draft a product description.
#[instrument(skip(state, payload))]
pub async fn description(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<DescriptionPayload>,
) -> Result<Json<Value>> {
    let name = payload.name.trim();
    let category = payload.category.trim();
    if name.is_empty() || category.is_empty() {
        return Err(AppError::BadRequest(
            "name and category are required".to_string(),
        ));
    }

    let text = state
        .ai()
        .draft_description(name, category, &payload.keywords)
        .await?;

    Ok(Json(json!({ "description": text })))
}

/// Unit suggestion payload.
#[derive(Debug, Deserialize)]
pub struct UnitsPayload {
    pub name: String,
    pub category: String,
}

/// Suggest priced units for a product.
#[instrument(skip(state, payload))]
pub async fn units(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<UnitsPayload>,
) -> Result<Json<Value>> {
    let name = payload.name.trim();
    let category = payload.category.trim();
    if name.is_empty() || category.is_empty() {
        return Err(AppError::BadRequest(
            "name and category are required".to_string(),
        ));
    }

    let suggestions = state.ai().suggest_units(name, category).await?;

    Ok(Json(json!({ "units": suggestions })))
}
