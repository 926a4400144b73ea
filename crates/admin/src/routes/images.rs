//! Image handlers: Cloudinary upload and Pexels search.

use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Upload a product image from a multipart `file` field.
#[instrument(skip(state, multipart))]
pub async fn upload(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read file: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("file is empty".to_string()));
        }

        let image = state.images().upload(&file_name, bytes.to_vec()).await?;

        tracing::info!(public_id = %image.public_id, "Image uploaded");

        return Ok((StatusCode::CREATED, Json(json!({ "image": image }))));
    }

    Err(AppError::BadRequest("file field is required".to_string()))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Search stock photos.
#[instrument(skip(state, params))]
pub async fn search(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("q is required".to_string()));
    }

    let photos = state.images().search(query).await?;

    Ok(Json(json!({ "photos": photos })))
}
